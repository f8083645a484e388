use serde::{Deserialize, Serialize};

use crate::document::{Element, Metadata, Screen, UiStateDocument};
use crate::element::{ElementSpec, FontSize, Position, Rgb, Size};
use crate::error::ReadError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDto {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeDto {
    Scalar(u32),
    Dimensions { width: u32, height: u32 },
}

/// Known fonts serialize as their point size, unknown tags verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSizeDto {
    Points(u32),
    Tag(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenDto {
    pub width: u32,
    pub height: u32,
    pub center_x: i32,
    pub center_y: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenDto>,
}

impl MetadataDto {
    pub fn is_empty(&self) -> bool {
        self.device_model.is_none() && self.screen.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDto {
    pub id: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSizeDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiStateDocumentDto {
    pub version: String,
    #[serde(default, skip_serializing_if = "MetadataDto::is_empty")]
    pub metadata: MetadataDto,
    pub elements: Vec<ElementDto>,
}

impl From<Position> for PositionDto {
    fn from(p: Position) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PositionDto> for Position {
    fn from(p: PositionDto) -> Self {
        Position::new(p.x, p.y)
    }
}

impl From<Size> for SizeDto {
    fn from(s: Size) -> Self {
        match s {
            Size::Scalar(value) => SizeDto::Scalar(value),
            Size::Dimensions { width, height } => SizeDto::Dimensions { width, height },
        }
    }
}

impl From<SizeDto> for Size {
    fn from(s: SizeDto) -> Self {
        match s {
            SizeDto::Scalar(value) => Size::Scalar(value),
            SizeDto::Dimensions { width, height } => Size::Dimensions { width, height },
        }
    }
}

impl From<&FontSize> for FontSizeDto {
    fn from(f: &FontSize) -> Self {
        match f.point_size() {
            Some(points) => FontSizeDto::Points(points),
            None => FontSizeDto::Tag(f.tag().to_string()),
        }
    }
}

impl From<FontSizeDto> for FontSize {
    fn from(f: FontSizeDto) -> Self {
        match f {
            FontSizeDto::Points(points) => FontSize::from_point_size(points)
                .unwrap_or_else(|| FontSize::Other(points.to_string())),
            FontSizeDto::Tag(tag) => FontSize::from_tag(&tag),
        }
    }
}

impl From<Screen> for ScreenDto {
    fn from(s: Screen) -> Self {
        Self {
            width: s.width,
            height: s.height,
            center_x: s.center.x,
            center_y: s.center.y,
        }
    }
}

impl From<ScreenDto> for Screen {
    fn from(s: ScreenDto) -> Self {
        Screen {
            width: s.width,
            height: s.height,
            center: Position::new(s.center_x, s.center_y),
        }
    }
}

impl From<&Metadata> for MetadataDto {
    fn from(m: &Metadata) -> Self {
        Self {
            device_model: m.device.clone(),
            screen: m.screen.map(Into::into),
        }
    }
}

impl From<MetadataDto> for Metadata {
    fn from(m: MetadataDto) -> Self {
        Metadata {
            device: m.device_model,
            screen: m.screen.map(Into::into),
        }
    }
}

impl From<&Element> for ElementDto {
    fn from(e: &Element) -> Self {
        let spec = &e.spec;
        Self {
            id: e.id.clone(),
            kind: spec.kind.clone(),
            label: spec.label.clone(),
            position: spec.position.map(Into::into),
            size: spec.size.map(Into::into),
            fill_color: spec.color.map(|c| c.to_string()),
            font_size: spec.font.as_ref().map(Into::into),
            text_content: spec.text_content.clone(),
        }
    }
}

impl TryFrom<ElementDto> for Element {
    type Error = ReadError;

    fn try_from(e: ElementDto) -> Result<Self, Self::Error> {
        let color = match e.fill_color {
            Some(raw) => Some(raw.parse::<Rgb>().map_err(|_| ReadError::InvalidField {
                id: e.id.clone(),
                field: "fill_color",
                value: raw.clone(),
            })?),
            None => None,
        };

        Ok(Element {
            spec: ElementSpec {
                kind: e.kind,
                label: e.label,
                position: e.position.map(Into::into),
                size: e.size.map(Into::into),
                color,
                font: e.font_size.map(Into::into),
                text_content: e.text_content,
            },
            id: e.id,
        })
    }
}

impl From<&UiStateDocument> for UiStateDocumentDto {
    fn from(d: &UiStateDocument) -> Self {
        Self {
            version: d.version.clone(),
            metadata: (&d.metadata).into(),
            elements: d.elements.iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<UiStateDocumentDto> for UiStateDocument {
    type Error = ReadError;

    fn try_from(d: UiStateDocumentDto) -> Result<Self, Self::Error> {
        Ok(UiStateDocument {
            version: d.version,
            metadata: d.metadata.into(),
            elements: d
                .elements
                .into_iter()
                .map(Element::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}
