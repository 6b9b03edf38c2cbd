/// Writes an 8x8 checkerboard of RGBA8888 pixels into `dst`.
///
/// `phase` shifts the pattern horizontally by that many pixels so successive
/// frames differ. Returns `false` without writing when `dst` is too small.
#[inline]
pub fn write_checkerboard_rgba(dst: &mut [u8], w: u16, h: u16, phase: u32) -> bool {
    let need = (w as usize) * (h as usize) * 4;
    if dst.len() < need {
        return false;
    }

    let shift = phase as usize;
    let mut o = 0;
    for y in 0..(h as usize) {
        for x in 0..(w as usize) {
            let tile = (((x + shift) >> 3) ^ (y >> 3)) & 1;
            let v = if tile == 0 { 0x20 } else { 0xE0 };
            dst[o] = v;
            dst[o + 1] = v;
            dst[o + 2] = v;
            dst[o + 3] = 0xFF;
            o += 4;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_alternating_tiles() {
        let mut buf = vec![0u8; 16 * 8 * 4];
        assert!(write_checkerboard_rgba(&mut buf, 16, 8, 0));
        assert_eq!(&buf[0..4], &[0x20, 0x20, 0x20, 0xFF]);
        assert_eq!(&buf[8 * 4..8 * 4 + 4], &[0xE0, 0xE0, 0xE0, 0xFF]);
    }

    #[test]
    fn phase_shifts_the_pattern() {
        let mut a = vec![0u8; 16 * 8 * 4];
        let mut b = vec![0u8; 16 * 8 * 4];
        write_checkerboard_rgba(&mut a, 16, 8, 0);
        write_checkerboard_rgba(&mut b, 16, 8, 8);
        assert_ne!(a, b);
        assert_eq!(&a[0..4], &b[8 * 4..8 * 4 + 4]);
    }

    #[test]
    fn short_buffer_is_left_untouched() {
        let mut buf = vec![7u8; 10];
        assert!(!write_checkerboard_rgba(&mut buf, 4, 4, 0));
        assert!(buf.iter().all(|b| *b == 7));
    }
}
