//! Persistent storage for the settings record.
//!
//! Uses the nRF52840's internal flash via the `sequential-storage` crate
//! to checkpoint the working settings on the sleep transition so they
//! survive power cycles.
//!
//! Storage layout:
//!   - A single fixed-size record (see `Settings::to_bytes`) stored under
//!     one key; the flash pages are managed by `sequential-storage` which
//!     handles wear levelling and GC.

use crate::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use crate::error::Error;
use crate::meter::settings::{Settings, SETTINGS_RECORD_SIZE};
use defmt::{error, info};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Key for the settings record in the map storage.
const KEY_SETTINGS: u8 = 0x01;

/// Working buffer size for `sequential-storage` operations.
const BUF_SIZE: usize = 64;

/// Load the last checkpointed settings.
///
/// Any failure - empty flash, short record, read error - degrades to the
/// defaults; persistence is never a reason to fail the device.
pub async fn load(flash: &mut impl embedded_storage_async::nor_flash::NorFlash) -> Settings {
    let mut settings = match try_load(flash).await {
        Ok(Some(s)) => {
            info!("Loaded settings from flash");
            s
        }
        Ok(None) => {
            info!("No settings in flash - using defaults");
            Settings::default()
        }
        Err(_) => {
            error!("Flash read error - using defaults");
            Settings::default()
        }
    };
    settings.sanitize();
    settings
}

async fn try_load(
    flash: &mut impl embedded_storage_async::nor_flash::NorFlash,
) -> Result<Option<Settings>, Error> {
    let flash_range = STORAGE_START..STORAGE_END;
    let mut buf = [0u8; BUF_SIZE];

    let data = sequential_storage::map::fetch_item::<u8, &[u8], _>(
        flash,
        flash_range,
        &mut sequential_storage::cache::NoCache::new(),
        &mut buf,
        &KEY_SETTINGS,
    )
    .await
    .map_err(|_| Error::Storage)?;

    Ok(data.and_then(Settings::from_bytes))
}

/// Checkpoint the settings; invoked only on the sleep transition.
pub async fn save(
    flash: &mut impl embedded_storage_async::nor_flash::NorFlash,
    settings: &Settings,
) -> Result<(), Error> {
    let flash_range = STORAGE_START..STORAGE_END;
    let mut buf = [0u8; BUF_SIZE];
    let record: [u8; SETTINGS_RECORD_SIZE] = settings.to_bytes();
    let item: &[u8] = &record;

    sequential_storage::map::store_item::<u8, &[u8], _>(
        flash,
        flash_range,
        &mut sequential_storage::cache::NoCache::new(),
        &mut buf,
        &KEY_SETTINGS,
        &item,
    )
    .await
    .map_err(|_| Error::Storage)?;

    info!("Settings checkpointed to flash");
    Ok(())
}
