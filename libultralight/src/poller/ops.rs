// libultralight-rs/libultralight/src/poller/ops.rs
//! Single-exchange primitives. The state machine and the sync facade both
//! go through these.

use super::Poller;
use crate::constants::PAGES_PER_READ;
use crate::protocol::{self, Command};
use crate::transport::FrameTransport;
use crate::types::{Counter, Pack, Page, Password, Signature, TearingFlag, Version};
use crate::Result;

impl Poller {
    fn exec(&self, transport: &mut dyn FrameTransport, command: Command) -> Result<Vec<u8>> {
        protocol::execute(transport, &command, self.config.fwt_fc)
    }

    pub fn read_version(&self, transport: &mut dyn FrameTransport) -> Result<Version> {
        let data = self.exec(transport, Command::GetVersion)?;
        protocol::decode_version(&data)
    }

    /// READ at a tag-local page address. Returns four pages.
    pub fn read_pages(
        &self,
        transport: &mut dyn FrameTransport,
        page: u8,
    ) -> Result<[Page; PAGES_PER_READ]> {
        let data = self.exec(transport, Command::Read { page })?;
        protocol::decode_read(&data)
    }

    /// SECTOR_SELECT on NTAG I2C. The selection holds until the tag is
    /// halted.
    pub fn select_sector(&mut self, transport: &mut dyn FrameTransport, sector: u8) -> Result<()> {
        self.exec(transport, Command::SectorSelect)?;
        protocol::execute(
            transport,
            &Command::SectorSelectTarget { sector },
            self.config.sector_select_fwt_fc,
        )?;
        log::debug!("sector {} -> {}", self.selected_sector, sector);
        self.selected_sector = sector;
        Ok(())
    }

    /// READ inside `sector`, selecting it first when another one is active.
    pub fn read_pages_from_sector(
        &mut self,
        transport: &mut dyn FrameTransport,
        sector: u8,
        page: u8,
    ) -> Result<[Page; PAGES_PER_READ]> {
        if sector != self.selected_sector {
            self.select_sector(transport, sector)?;
        }
        self.read_pages(transport, page)
    }

    pub fn read_signature(&self, transport: &mut dyn FrameTransport) -> Result<Signature> {
        let data = self.exec(transport, Command::ReadSignature)?;
        protocol::decode_signature(&data)
    }

    pub fn read_counter(&self, transport: &mut dyn FrameTransport, counter: u8) -> Result<Counter> {
        let data = self.exec(transport, Command::ReadCounter { counter })?;
        protocol::decode_counter(&data)
    }

    pub fn read_tearing_flag(
        &self,
        transport: &mut dyn FrameTransport,
        flag: u8,
    ) -> Result<TearingFlag> {
        let data = self.exec(transport, Command::CheckTearingFlag { flag })?;
        protocol::decode_tearing_flag(&data)
    }

    /// PWD_AUTH. Returns the PACK the tag answered with.
    pub fn authenticate(
        &self,
        transport: &mut dyn FrameTransport,
        password: &Password,
    ) -> Result<Pack> {
        let data = self.exec(
            transport,
            Command::PwdAuth {
                password: *password,
            },
        )?;
        protocol::decode_pack(&data)
    }

    pub fn write_page(
        &self,
        transport: &mut dyn FrameTransport,
        page: u8,
        data: &Page,
    ) -> Result<()> {
        self.exec(transport, Command::Write { page, data: *data })?;
        Ok(())
    }

    /// HLTA. Errors are logged and dropped; a halted tag also drops its
    /// sector selection.
    pub fn halt(&mut self, transport: &mut dyn FrameTransport) {
        if let Err(err) = transport.halt() {
            log::debug!("halt failed: {err}");
        }
        self.selected_sector = 0;
    }
}
