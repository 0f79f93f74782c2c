//! Chip identification
//!
//! The model code is an opaque, platform-defined enumeration value.
//! Nothing in Ferrule interprets it; it is handed to scripts as-is.

/// Platform-defined chip model code
///
/// Wraps the raw value read from the chip's identity registers or the
/// vendor SDK. Two models compare equal only if their raw codes match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipModel(pub u32);

impl ChipModel {
    /// Raw platform code
    pub const fn code(self) -> u32 {
        self.0
    }
}

impl From<u32> for ChipModel {
    fn from(code: u32) -> Self {
        ChipModel(code)
    }
}

/// Static identity of the running SoC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipInfo {
    /// Chip model code
    pub model: ChipModel,
    /// Silicon revision
    pub revision: u16,
    /// Number of CPU cores
    pub cores: u8,
}

impl ChipInfo {
    /// Create chip info for a model with unknown revision and one core
    pub const fn new(model: ChipModel) -> Self {
        Self {
            model,
            revision: 0,
            cores: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip_model_passthrough() {
        let model = ChipModel::from(0x0002);
        assert_eq!(model.code(), 2);
        assert_eq!(model, ChipModel(2));
    }

    #[test]
    fn test_chip_info_defaults() {
        let info = ChipInfo::new(ChipModel(9));
        assert_eq!(info.model.code(), 9);
        assert_eq!(info.revision, 0);
        assert_eq!(info.cores, 1);
    }
}
