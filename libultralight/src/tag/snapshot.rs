// libultralight-rs/libultralight/src/tag/snapshot.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{ConfigPages, FeatureSet, TagType};
use crate::constants::{CONFIG_PAGES, COUNTER_NUM, TEARING_FLAG_NUM};
use crate::types::{AnticollisionData, Counter, Page, Signature, TearingFlag, Uid, Version};

/// Everything a scan learned about one tag.
///
/// Filled in stage by stage by the poller. Optional data that was not
/// supported, not read, or failed to read stays `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagSnapshot {
    anticollision: AnticollisionData,
    tag_type: Option<TagType>,
    version: Option<Version>,
    pages: Vec<Page>,
    pages_read: usize,
    signature: Option<Signature>,
    counters: [Option<Counter>; COUNTER_NUM],
    tearing_flags: [Option<TearingFlag>; TEARING_FLAG_NUM],
}

impl TagSnapshot {
    pub fn new(anticollision: AnticollisionData) -> Self {
        Self {
            anticollision,
            ..Self::default()
        }
    }

    pub fn anticollision(&self) -> &AnticollisionData {
        &self.anticollision
    }

    pub fn uid(&self) -> &Uid {
        &self.anticollision.uid
    }

    pub fn tag_type(&self) -> Option<TagType> {
        self.tag_type
    }

    /// Fix the tag type and size the page buffer for it. The type can only
    /// be set once per scan; later calls are ignored.
    pub(crate) fn set_tag_type(&mut self, tag_type: TagType) {
        if let Some(current) = self.tag_type {
            log::warn!("tag type already resolved as {current}, ignoring {tag_type}");
            return;
        }
        self.tag_type = Some(tag_type);
        self.pages = vec![Page::default(); tag_type.pages_total()];
        self.pages_read = 0;
    }

    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    pub(crate) fn set_version(&mut self, version: Version) {
        self.version = Some(version);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn pages_read(&self) -> usize {
        self.pages_read
    }

    pub fn pages_total(&self) -> usize {
        self.pages.len()
    }

    /// Copy pages read from the tag, starting at `pages_read`. Pages past
    /// the end of memory are dropped. Returns how many were stored.
    pub(crate) fn append_pages(&mut self, pages: &[Page]) -> usize {
        let start = self.pages_read;
        let count = pages.len().min(self.pages_total() - start);
        self.pages[start..start + count].copy_from_slice(&pages[..count]);
        self.pages_read += count;
        count
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub(crate) fn set_signature(&mut self, signature: Signature) {
        self.signature = Some(signature);
    }

    pub fn counter(&self, index: usize) -> Option<&Counter> {
        self.counters.get(index)?.as_ref()
    }

    pub fn counters(&self) -> &[Option<Counter>; COUNTER_NUM] {
        &self.counters
    }

    pub(crate) fn set_counter(&mut self, index: usize, counter: Counter) {
        if let Some(slot) = self.counters.get_mut(index) {
            *slot = Some(counter);
        }
    }

    pub fn tearing_flag(&self, index: usize) -> Option<&TearingFlag> {
        self.tearing_flags.get(index)?.as_ref()
    }

    pub fn tearing_flags(&self) -> &[Option<TearingFlag>; TEARING_FLAG_NUM] {
        &self.tearing_flags
    }

    pub(crate) fn set_tearing_flag(&mut self, index: usize, flag: TearingFlag) {
        if let Some(slot) = self.tearing_flags.get_mut(index) {
            *slot = Some(flag);
        }
    }

    /// Config pages as currently stored, read or not.
    pub fn config(&self) -> Option<ConfigPages> {
        let first = self.tag_type?.config_page()?;
        let pages: &[Page; CONFIG_PAGES] = self.pages.get(first..first + CONFIG_PAGES)?.try_into().ok()?;
        Some(ConfigPages::from_pages(pages))
    }

    pub(crate) fn set_config(&mut self, config: &ConfigPages) {
        let Some(first) = self.tag_type.and_then(|t| t.config_page()) else {
            return;
        };
        if let Some(dst) = self.pages.get_mut(first..first + CONFIG_PAGES) {
            dst.copy_from_slice(&config.to_pages());
        }
    }

    /// Whether the NFC counter is enabled in the config pages.
    ///
    /// `None` while the config pages have not been read yet. Only NTAG21x
    /// gate their counter on config; other types always report `Some(true)`.
    pub fn counters_configured(&self) -> Option<bool> {
        match self.tag_type? {
            TagType::Ntag213 | TagType::Ntag215 | TagType::Ntag216 => {
                let first = self.tag_type?.config_page()?;
                if first + CONFIG_PAGES > self.pages_read {
                    return None;
                }
                Some(self.config()?.access.nfc_cnt_en())
            }
            _ => Some(true),
        }
    }

    /// All pages read, and for password capable tags a PWD/PACK recovered
    /// (tags always read them back as zeros).
    pub fn is_all_data_read(&self) -> bool {
        let Some(tag_type) = self.tag_type else {
            return false;
        };
        if self.pages_read != self.pages_total() {
            return false;
        }
        if !tag_type.supports(FeatureSet::PASSWORD_AUTH) {
            return true;
        }
        self.config().is_some_and(|cfg| {
            cfg.password.as_u32() != 0 || cfg.pack.as_bytes() != &[0, 0]
        })
    }
}
