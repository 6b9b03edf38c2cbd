use serde::Serialize;

/// Condition flags copied out of the F register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CpuFlags {
    /// Carry (C).
    pub carry: bool,
    /// Half carry (H).
    pub half_carry: bool,
    /// Subtract (N).
    pub subtract: bool,
    /// Zero (Z).
    pub zero: bool,
}

impl CpuFlags {
    /// Decodes the upper nibble of an F register value.
    pub fn from_f(f: u8) -> Self {
        Self {
            zero: f & 0x80 != 0,
            subtract: f & 0x40 != 0,
            half_carry: f & 0x20 != 0,
            carry: f & 0x10 != 0,
        }
    }

    /// Encodes the flags back into an F register value.
    pub fn to_f(self) -> u8 {
        (u8::from(self.zero) << 7)
            | (u8::from(self.subtract) << 6)
            | (u8::from(self.half_carry) << 5)
            | (u8::from(self.carry) << 4)
    }
}

/// Register state captured at one instant. Owns its data; outlives the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CpuSnapshot {
    /// Register A.
    pub a: u8,
    /// Register B.
    pub b: u8,
    /// Register C.
    pub c: u8,
    /// Register D.
    pub d: u8,
    /// Register E.
    pub e: u8,
    /// HL register pair.
    pub hl: u16,
    /// Program counter.
    pub pc: u16,
    /// Stack pointer.
    pub sp: u16,
    /// Decoded F register.
    pub flags: CpuFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_round_trip_through_f_register() {
        let flags = CpuFlags::from_f(0xB0);
        assert!(flags.zero);
        assert!(!flags.subtract);
        assert!(flags.half_carry);
        assert!(flags.carry);
        assert_eq!(flags.to_f(), 0xB0);
    }
}
