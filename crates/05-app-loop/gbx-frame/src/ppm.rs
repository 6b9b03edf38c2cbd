/// Encodes RGBA8888 pixels as a binary PPM (P6), dropping alpha.
///
/// Each source pixel becomes a `scale x scale` block (nearest neighbour). A
/// scale of zero is treated as one. `rgba` must hold `width * height * 4`
/// bytes; any excess is ignored and missing pixels encode as black.
pub fn encode_ppm(rgba: &[u8], width: usize, height: usize, scale: usize) -> Vec<u8> {
    let scale = scale.max(1);
    let (out_w, out_h) = (width * scale, height * scale);
    let header = format!("P6\n{out_w} {out_h}\n255\n");
    let mut out = Vec::with_capacity(header.len() + out_w * out_h * 3);
    out.extend_from_slice(header.as_bytes());

    let mut row = Vec::with_capacity(out_w * 3);
    for y in 0..height {
        row.clear();
        for x in 0..width {
            let offset = (y * width + x) * 4;
            let rgb = rgba.get(offset..offset + 3).unwrap_or(&[0, 0, 0]);
            for _ in 0..scale {
                row.extend_from_slice(rgb);
            }
        }
        for _ in 0..scale {
            out.extend_from_slice(&row);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_scaled_body() {
        let rgba = [1, 2, 3, 255, 4, 5, 6, 255];
        let ppm = encode_ppm(&rgba, 2, 1, 2);
        let header = b"P6\n4 2\n255\n";
        assert_eq!(&ppm[..header.len()], header);
        let body = &ppm[header.len()..];
        assert_eq!(
            body,
            &[1, 2, 3, 1, 2, 3, 4, 5, 6, 4, 5, 6, 1, 2, 3, 1, 2, 3, 4, 5, 6, 4, 5, 6]
        );
    }

    #[test]
    fn zero_scale_behaves_like_one() {
        let rgba = [9, 9, 9, 255];
        assert_eq!(encode_ppm(&rgba, 1, 1, 0), encode_ppm(&rgba, 1, 1, 1));
    }
}
