use serde::{Deserialize, Serialize};

/// Visual property a channel maps data onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    X,
    XBand,
    Y,
    YBand,
    Color,
    Size,
    Numeric,
    Text,
    Category,
}

/// Semantic type of the encoded data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Quantitative,
    Nominal,
    Ordinal,
    Temporal,
}

impl DataType {
    #[must_use]
    pub fn is_discrete(self) -> bool {
        match self {
            Self::Nominal | Self::Ordinal => true,
            Self::Quantitative | Self::Temporal => false,
        }
    }
}

impl ChannelType {
    #[must_use]
    pub fn is_x(self) -> bool {
        match self {
            Self::X | Self::XBand => true,
            Self::Y
            | Self::YBand
            | Self::Color
            | Self::Size
            | Self::Numeric
            | Self::Text
            | Self::Category => false,
        }
    }

    #[must_use]
    pub fn is_y(self) -> bool {
        match self {
            Self::Y | Self::YBand => true,
            Self::X
            | Self::XBand
            | Self::Color
            | Self::Size
            | Self::Numeric
            | Self::Text
            | Self::Category => false,
        }
    }

    #[must_use]
    pub fn is_xy(self) -> bool {
        self.is_x() || self.is_y()
    }

    #[must_use]
    pub fn is_band(self) -> bool {
        matches!(self, Self::XBand | Self::YBand)
    }

    /// Whether a field of `data_type` on this channel partitions data into groups.
    #[must_use]
    pub fn partitions_groups(self, data_type: DataType) -> bool {
        if !data_type.is_discrete() {
            return false;
        }
        match self {
            Self::Category | Self::Text | Self::Color => true,
            Self::X | Self::XBand | Self::Y | Self::YBand => true,
            Self::Size | Self::Numeric => false,
        }
    }
}
