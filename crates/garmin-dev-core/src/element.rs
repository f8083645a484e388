use std::fmt;
use std::str::FromStr;

/// Pixel coordinate on the device screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rendered extent of a primitive.
///
/// Circles and strokes report a single scalar (radius or thickness), boxes a
/// width×height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Scalar(u32),
    Dimensions { width: u32, height: u32 },
}

/// 24-bit RGB color, printed in canonical `#rrggbb` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        if value > 0x00FF_FFFF {
            return None;
        }
        Some(Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a firmware color token.
///
/// Accepts `0xRRGGBB`, `#RRGGBB` or bare hex digits in any case. Short values
/// are read as a 24-bit number, so `0xff` is `#0000ff`.
impl FromStr for Rgb {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .or_else(|| s.strip_prefix('#'))
            .unwrap_or(s);

        if digits.is_empty()
            || digits.len() > 6
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(());
        }

        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(Rgb::from_u32)
            .ok_or(())
    }
}

/// Categorical font size reported by the firmware.
///
/// Known tags map to a point size at serialization time. Tags outside the
/// closed set are kept verbatim in [`FontSize::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontSize {
    XTiny,
    Small,
    Medium,
    Large,
    Other(String),
}

impl FontSize {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "XTINY" => FontSize::XTiny,
            "SMALL" => FontSize::Small,
            "MEDIUM" => FontSize::Medium,
            "LARGE" => FontSize::Large,
            _ => FontSize::Other(tag.trim().to_string()),
        }
    }

    pub fn from_point_size(points: u32) -> Option<Self> {
        match points {
            10 => Some(FontSize::XTiny),
            14 => Some(FontSize::Small),
            18 => Some(FontSize::Medium),
            24 => Some(FontSize::Large),
            _ => None,
        }
    }

    pub fn point_size(&self) -> Option<u32> {
        match self {
            FontSize::XTiny => Some(10),
            FontSize::Small => Some(14),
            FontSize::Medium => Some(18),
            FontSize::Large => Some(24),
            FontSize::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FontSize::Other(_))
    }

    pub fn tag(&self) -> &str {
        match self {
            FontSize::XTiny => "XTINY",
            FontSize::Small => "SMALL",
            FontSize::Medium => "MEDIUM",
            FontSize::Large => "LARGE",
            FontSize::Other(tag) => tag,
        }
    }
}

impl fmt::Display for FontSize {
    /// Serialized form: the point size for known tags, the raw tag otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.point_size() {
            Some(points) => write!(f, "{}", points),
            None => f.write_str(self.tag()),
        }
    }
}

/// Language-neutral description of one rendered UI element.
///
/// `kind` is always present. Every other field is optional and is omitted from
/// serialized output when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    pub kind: String,
    /// Disambiguating sub-identifier from the log line (a side, an index).
    pub label: Option<String>,
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub color: Option<Rgb>,
    pub font: Option<FontSize>,
    pub text_content: Option<String>,
}

impl ElementSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            label: None,
            position: None,
            size: None,
            color: None,
            font: None,
            text_content: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_font(mut self, font: FontSize) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }
}
