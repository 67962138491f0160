/// A color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    /// Parses `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA` notations.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let digits: Vec<u8> = match hex.len() {
            3 | 4 => hex
                .chars()
                .filter_map(|c| c.to_digit(16))
                .map(|d| (d * 17) as u8)
                .collect(),
            6 | 8 => (0..hex.len())
                .step_by(2)
                .filter_map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
                .collect(),
            _ => return None,
        };
        let channel = |i: usize| digits.get(i).map(|d| f64::from(*d) / 255.0);
        Some(Rgba {
            red: channel(0)?,
            green: channel(1)?,
            blue: channel(2)?,
            alpha: channel(3).unwrap_or(1.0),
        })
    }

    pub fn to_hex(&self) -> String {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let rgb = format!(
            "#{:02X}{:02X}{:02X}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        );
        if self.alpha < 1.0 {
            format!("{rgb}{:02X}", byte(self.alpha))
        } else {
            rgb
        }
    }

    /// Scales the saturation, keeping hue and lightness.
    pub fn saturate(&self, factor: f64) -> Self {
        let (h, s, l) = self.to_hsl();
        Rgba::from_hsl(h, (s * factor).clamp(0.0, 1.0), l, self.alpha)
    }

    fn to_hsl(self) -> (f64, f64, f64) {
        let max = self.red.max(self.green).max(self.blue);
        let min = self.red.min(self.green).min(self.blue);
        let l = (max + min) / 2.0;
        if max == min {
            return (0.0, 0.0, l);
        }
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == self.red {
            (self.green - self.blue) / d + if self.green < self.blue { 6.0 } else { 0.0 }
        } else if max == self.green {
            (self.blue - self.red) / d + 2.0
        } else {
            (self.red - self.green) / d + 4.0
        };
        (h / 6.0, s, l)
    }

    fn from_hsl(h: f64, s: f64, l: f64, alpha: f64) -> Self {
        if s == 0.0 {
            return Rgba {
                red: l,
                green: l,
                blue: l,
                alpha,
            };
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let hue = |mut t: f64| {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };
        Rgba {
            red: hue(h + 1.0 / 3.0),
            green: hue(h),
            blue: hue(h - 1.0 / 3.0),
            alpha,
        }
    }
}
