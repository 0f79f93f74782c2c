//! Chip identification for RP2040
//!
//! SYSINFO `CHIP_ID` holds the JEDEC manufacturer, part number and silicon
//! revision. The part number is reported as the chip model code.

use embassy_rp::pac;
use ferrule_hal::{ChipInfo, ChipModel};

/// Number of Cortex-M0+ cores
pub const CORE_COUNT: u8 = 2;

/// Read the chip identity registers
pub fn read_chip_info() -> ChipInfo {
    let id = pac::SYSINFO.chip_id().read();
    ChipInfo {
        model: ChipModel(id.part() as u32),
        revision: id.revision() as u16,
        cores: CORE_COUNT,
    }
}
