use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`
    pub const fn hex(value: u32) -> Self {
        Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Builds a colour from unbounded channel values, clamping each to 0..=255.
    pub fn clamped(r: f32, g: f32, b: f32) -> Self {
        Self::new(channel(r), channel(g), channel(b))
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::clamped(
            f32::from(self.r) * factor,
            f32::from(self.g) * factor,
            f32::from(self.b) * factor,
        )
    }

    pub fn gray(level: f32) -> Self {
        Self::clamped(level, level, level)
    }

    /// Three phase-shifted sines around `base`, the usual holographic shimmer.
    /// `phase` is in turns, so 1.0 is a full cycle.
    pub fn shimmer(phase: f32, base: f32, amplitude: f32) -> Self {
        let angle = phase * TAU;
        Self::clamped(
            base + amplitude * angle.sin(),
            base + amplitude * (angle + 2.1).sin(),
            base + amplitude * (angle + 4.2).sin(),
        )
    }

    /// Fully saturated colour for `hue` in turns.
    pub fn from_hue(hue: f32) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let x = 1.0 - ((h % 2.0) - 1.0).abs();
        let (r, g, b) = match h as u32 {
            0 => (1.0, x, 0.0),
            1 => (x, 1.0, 0.0),
            2 => (0.0, 1.0, x),
            3 => (0.0, x, 1.0),
            4 => (x, 0.0, 1.0),
            _ => (1.0, 0.0, x),
        };
        Self::clamped(r * 255.0, g * 255.0, b * 255.0)
    }

    /// Linear blend, `t` clamped to 0..=1.
    pub fn mix(self, other: Rgb, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| f32::from(a) + (f32::from(b) - f32::from(a)) * t;
        Self::clamped(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }
}

fn channel(value: f32) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.round().clamp(0.0, 255.0) as u8
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(Rgb::hex(0xCD5C5C), Rgb::new(0xCD, 0x5C, 0x5C));
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Rgb::clamped(-20.0, 300.0, f32::NAN), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_scale() {
        assert_eq!(Rgb::new(100, 200, 50).scale(1.3), Rgb::new(130, 255, 65));
    }

    #[test]
    fn test_from_hue() {
        assert_eq!(Rgb::from_hue(0.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hue(1.0 / 3.0), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hue(-1.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_mix() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.mix(b, 0.5), Rgb::new(100, 50, 25));
        assert_eq!(a.mix(b, 2.0), b);
    }
}
