// libultralight-rs/libultralight/src/test_support.rs
//! Test support helpers intended for use by unit and integration tests.
//!
//! [`EmulatedTag`] answers Ultralight commands from an in-memory image so
//! full scans can run without hardware. It follows the tag's
//! acknowledgement conventions: WRITE and SECTOR_SELECT answer with a bare
//! ACK nibble, the second SECTOR_SELECT packet with silence, and rejected
//! commands with a NAK.
#![allow(dead_code)]

use std::collections::HashMap;

use crate::constants::*;
use crate::tag::{self, Access, ConfigPages, FeatureSet, TagType};
use crate::transport::{FrameTransport, MockTransport, TransportError};
use crate::types::{
    AnticollisionData, Counter, Pack, Page, Password, Signature, TearingFlag, Uid,
};

/// Build a MockTransport pre-seeded with the given responses.
#[doc(hidden)]
pub fn mock_with_responses(responses: Vec<Vec<u8>>) -> MockTransport {
    let mut mock = MockTransport::new();
    for resp in responses {
        mock.push_response(resp);
    }
    mock
}

/// GET_VERSION answer of a genuine tag of the given type, `None` for types
/// that do not implement the command.
pub fn version_bytes(tag_type: TagType) -> Option<[u8; VERSION_SIZE]> {
    let v = match tag_type {
        TagType::Origin | TagType::Ntag203 => return None,
        TagType::Ul11 => [0x00, 0x04, 0x03, 0x01, 0x01, 0x00, 0x0B, 0x03],
        TagType::Ul21 => [0x00, 0x04, 0x03, 0x01, 0x01, 0x00, 0x0E, 0x03],
        TagType::Ntag213 => [0x00, 0x04, 0x04, 0x02, 0x01, 0x00, 0x0F, 0x03],
        TagType::Ntag215 => [0x00, 0x04, 0x04, 0x02, 0x01, 0x00, 0x11, 0x03],
        TagType::Ntag216 => [0x00, 0x04, 0x04, 0x02, 0x01, 0x00, 0x13, 0x03],
        TagType::NtagI2c1k => [0x00, 0x04, 0x04, 0x05, 0x02, 0x01, 0x13, 0x03],
        TagType::NtagI2c2k => [0x00, 0x04, 0x04, 0x05, 0x02, 0x01, 0x15, 0x03],
        TagType::NtagI2cPlus1k => [0x00, 0x04, 0x04, 0x05, 0x02, 0x02, 0x13, 0x03],
        TagType::NtagI2cPlus2k => [0x00, 0x04, 0x04, 0x05, 0x02, 0x02, 0x15, 0x03],
    };
    Some(v)
}

/// Content of linear page `index` in a freshly built [`EmulatedTag`].
pub fn pattern_page(index: usize) -> Page {
    Page::from_bytes([index as u8, (index >> 8) as u8, 0xC0, 0xDE])
}

fn nak() -> TransportError {
    TransportError::WrongCrc { raw: vec![0x00] }
}

fn ack() -> TransportError {
    TransportError::WrongCrc { raw: vec![ACK] }
}

/// In-memory Ultralight / NTAG tag.
#[derive(Debug, Clone)]
pub struct EmulatedTag {
    tag_type: TagType,
    identity: AnticollisionData,
    version: Option<[u8; VERSION_SIZE]>,
    memory: Vec<Page>,
    /// (sector, address) -> linear page, NTAG I2C only
    addresses: HashMap<(u8, u8), usize>,
    signature: Signature,
    counters: [Counter; COUNTER_NUM],
    tearing_flags: [TearingFlag; TEARING_FLAG_NUM],
    password: Password,
    pack: Pack,
    fail_reads_from: Option<usize>,
    fail_signature: bool,
    fail_counters: bool,
    fail_tearing_flags: bool,
    present: bool,
    // session state, cleared by HLTA
    authenticated: bool,
    halted: bool,
    sector: u8,
    sector_select_pending: bool,
    commands: Vec<Vec<u8>>,
    halts: usize,
}

impl EmulatedTag {
    /// Factory-fresh tag: pattern filled memory, AUTH0 0xFF, password
    /// `FF FF FF FF`, no failures injected.
    pub fn new(tag_type: TagType) -> Self {
        let total = tag_type.pages_total();
        let addresses = if tag_type.is_ntag_i2c() {
            (0..total)
                .filter_map(|i| tag::translate(tag_type, i).map(|a| ((a.sector, a.address), i)))
                .collect()
        } else {
            HashMap::new()
        };

        let uid = [0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66];
        let mut sig = [0u8; SIGNATURE_SIZE];
        for (i, b) in sig.iter_mut().enumerate() {
            *b = i as u8;
        }

        let mut tag = Self {
            tag_type,
            identity: AnticollisionData::new(
                Uid::try_from(&uid[..]).unwrap_or_default(),
                [0x44, 0x00],
                0x00,
            ),
            version: version_bytes(tag_type),
            memory: (0..total).map(pattern_page).collect(),
            addresses,
            signature: Signature::from_bytes(sig),
            counters: [
                Counter::from_bytes([1, 0, 0]),
                Counter::from_bytes([2, 0, 0]),
                Counter::from_bytes([3, 0, 0]),
            ],
            tearing_flags: [TearingFlag::default(); TEARING_FLAG_NUM],
            password: Password::from_bytes(DEFAULT_PASSWORD),
            pack: Pack::default(),
            fail_reads_from: None,
            fail_signature: false,
            fail_counters: false,
            fail_tearing_flags: false,
            present: true,
            authenticated: false,
            halted: false,
            sector: 0,
            sector_select_pending: false,
            commands: Vec::new(),
            halts: 0,
        };
        tag.update_config(|cfg| {
            *cfg = ConfigPages {
                mirror: 0x04,
                auth0: 0xFF,
                password: Password::from_bytes(DEFAULT_PASSWORD),
                ..ConfigPages::default()
            };
        });
        tag
    }

    /// Drop GET_VERSION support, the way legacy tags NAK it.
    pub fn without_version(mut self) -> Self {
        self.version = None;
        self
    }

    /// Protect pages from `auth0` on, for reads and writes.
    pub fn with_password(mut self, password: Password, pack: Pack, auth0: u8) -> Self {
        self.password = password;
        self.pack = pack;
        self.update_config(|cfg| {
            cfg.password = password;
            cfg.pack = pack;
            cfg.auth0 = auth0;
            cfg.access.set_prot(true);
        });
        self
    }

    /// Overwrite the ACCESS byte, keeping PROT as set by `with_password`.
    pub fn with_access(mut self, access: Access) -> Self {
        self.update_config(|cfg| {
            let prot = cfg.access.prot();
            cfg.access = access;
            if prot {
                cfg.access.set_prot(true);
            }
        });
        self
    }

    /// Time out every READ whose first linear page is `page` or later.
    pub fn fail_reads_from(mut self, page: usize) -> Self {
        self.fail_reads_from = Some(page);
        self
    }

    pub fn fail_signature(mut self) -> Self {
        self.fail_signature = true;
        self
    }

    pub fn fail_counters(mut self) -> Self {
        self.fail_counters = true;
        self
    }

    pub fn fail_tearing_flags(mut self) -> Self {
        self.fail_tearing_flags = true;
        self
    }

    pub fn with_counter(mut self, index: usize, counter: Counter) -> Self {
        if let Some(slot) = self.counters.get_mut(index) {
            *slot = counter;
        }
        self
    }

    /// Take the tag out of the field.
    pub fn remove(&mut self) {
        self.present = false;
    }

    pub fn tag_type(&self) -> TagType {
        self.tag_type
    }

    pub fn page(&self, linear: usize) -> Option<Page> {
        self.memory.get(linear).copied()
    }

    pub fn pages(&self) -> &[Page] {
        &self.memory
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn pack(&self) -> Pack {
        self.pack
    }

    /// Every frame received, in order.
    pub fn commands(&self) -> &[Vec<u8>] {
        &self.commands
    }

    /// Number of received frames starting with `code`.
    pub fn count_commands(&self, code: u8) -> usize {
        self.commands
            .iter()
            .filter(|c| c.first() == Some(&code))
            .count()
    }

    pub fn halts(&self) -> usize {
        self.halts
    }

    pub fn current_sector(&self) -> u8 {
        self.sector
    }

    fn config(&self) -> Option<ConfigPages> {
        let first = self.tag_type.config_page()?;
        let pages: &[Page; CONFIG_PAGES] = self
            .memory
            .get(first..first + CONFIG_PAGES)?
            .try_into()
            .ok()?;
        Some(ConfigPages::from_pages(pages))
    }

    fn update_config(&mut self, f: impl FnOnce(&mut ConfigPages)) {
        let Some(mut cfg) = self.config() else {
            return;
        };
        f(&mut cfg);
        if let Some(first) = self.tag_type.config_page() {
            self.memory[first..first + CONFIG_PAGES].copy_from_slice(&cfg.to_pages());
        }
    }

    fn supports(&self, feature: FeatureSet) -> bool {
        self.tag_type.supports(feature)
    }

    /// Linear page for a tag-local address in the current sector.
    fn resolve(&self, address: u8) -> Option<usize> {
        if self.tag_type.is_ntag_i2c() {
            self.addresses.get(&(self.sector, address)).copied()
        } else {
            let linear = usize::from(address);
            (linear < self.memory.len()).then_some(linear)
        }
    }

    fn is_protected(&self, linear: usize, write: bool) -> bool {
        !self.authenticated
            && self
                .config()
                .is_some_and(|cfg| cfg.is_page_protected(linear, write))
    }

    fn read(&self, address: u8) -> Result<Vec<u8>, TransportError> {
        let linear = self.resolve(address).ok_or_else(nak)?;
        if self.fail_reads_from.is_some_and(|k| linear >= k) {
            return Err(TransportError::Timeout);
        }
        if self.is_protected(linear, false) {
            return Err(nak());
        }

        let total = self.memory.len();
        let mut out = Vec::with_capacity(PAGE_SIZE * PAGES_PER_READ);
        for i in 0..PAGES_PER_READ {
            let page = if self.tag_type.is_ntag_i2c() {
                self.resolve(address.wrapping_add(i as u8))
            } else {
                // plain tags roll over to page 0
                Some((linear + i) % total)
            };
            let bytes = match page {
                Some(p) if self.tag_type.is_pwd_or_pack_page(p) => [0; PAGE_SIZE],
                Some(p) if self.is_protected(p, false) => [0; PAGE_SIZE],
                Some(p) => *self.memory[p].as_bytes(),
                None => [0; PAGE_SIZE],
            };
            out.extend_from_slice(&bytes);
        }
        Ok(out)
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<Vec<u8>, TransportError> {
        let linear = self.resolve(address).ok_or_else(nak)?;
        if self.is_protected(linear, true) {
            return Err(nak());
        }
        let bytes: [u8; PAGE_SIZE] = data.try_into().map_err(|_| nak())?;
        self.memory[linear] = Page::from_bytes(bytes);
        Err(ack())
    }

    fn handle(&mut self, frame: &[u8]) -> Result<Vec<u8>, TransportError> {
        if self.sector_select_pending {
            self.sector_select_pending = false;
            if let [sector, _, _, _] = frame {
                self.sector = *sector;
                // accepted by staying silent
                return Err(TransportError::Timeout);
            }
            return Err(nak());
        }

        match frame {
            [CMD_GET_VERSION] => self.version.map(|v| v.to_vec()).ok_or_else(nak),
            [CMD_READ_PAGE, page] => self.read(*page),
            [CMD_WRITE_PAGE, page, data @ ..] => self.write(*page, data),
            [CMD_READ_SIG, 0x00] if self.supports(FeatureSet::READ_SIGNATURE) => {
                if self.fail_signature {
                    return Err(TransportError::Timeout);
                }
                Ok(self.signature.as_bytes().to_vec())
            }
            [CMD_READ_CNT, n] if self.supports(FeatureSet::READ_COUNTER) => {
                let n = usize::from(*n);
                let valid = if self.supports(FeatureSet::SINGLE_COUNTER) {
                    n == SINGLE_COUNTER_INDEX
                        && self.config().is_some_and(|c| c.access.nfc_cnt_en())
                } else {
                    n < COUNTER_NUM
                };
                if !valid || self.fail_counters {
                    return Err(nak());
                }
                Ok(self.counters[n].as_bytes().to_vec())
            }
            [CMD_CHECK_TEARING, n] if self.supports(FeatureSet::CHECK_TEARING_FLAG) => {
                let n = usize::from(*n);
                if n >= TEARING_FLAG_NUM || self.fail_tearing_flags {
                    return Err(nak());
                }
                Ok(vec![self.tearing_flags[n].value()])
            }
            [CMD_PWD_AUTH, pwd @ ..] if self.supports(FeatureSet::PASSWORD_AUTH) => {
                if pwd == self.password.as_bytes() {
                    self.authenticated = true;
                    Ok(self.pack.as_bytes().to_vec())
                } else {
                    Err(nak())
                }
            }
            [CMD_SECTOR_SELECT, SECTOR_SELECT_ARG] if self.supports(FeatureSet::SECTOR_SELECT) => {
                self.sector_select_pending = true;
                Err(ack())
            }
            _ => Err(nak()),
        }
    }
}

impl FrameTransport for EmulatedTag {
    fn exchange(&mut self, frame: &[u8], _fwt_fc: u32) -> Result<Vec<u8>, TransportError> {
        self.commands.push(frame.to_vec());
        if !self.present {
            return Err(TransportError::NotPresent);
        }
        if self.halted {
            // reselect: session state starts over
            self.halted = false;
            self.authenticated = false;
            self.sector = 0;
            self.sector_select_pending = false;
        }
        self.handle(frame)
    }

    fn halt(&mut self) -> Result<(), TransportError> {
        self.halts += 1;
        self.halted = true;
        Ok(())
    }

    fn anticollision(&self) -> AnticollisionData {
        self.identity
    }
}
