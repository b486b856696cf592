use libultralight::tag::{FeatureSet, TagType};
use libultralight::test_support::version_bytes;
use libultralight::types::Version;

#[test]
fn version_bytes_resolve_to_their_type() {
    for tag_type in TagType::ALL {
        match version_bytes(tag_type) {
            Some(raw) => assert_eq!(TagType::from_version(&Version::from_bytes(raw)), tag_type),
            None => assert!(!tag_type.supports(FeatureSet::READ_VERSION), "{tag_type}"),
        }
    }
}

#[test]
fn page_totals() {
    let expected = [
        (TagType::Origin, 16),
        (TagType::Ntag203, 42),
        (TagType::Ul11, 20),
        (TagType::Ul21, 41),
        (TagType::Ntag213, 45),
        (TagType::Ntag215, 135),
        (TagType::Ntag216, 231),
        (TagType::NtagI2c1k, 231),
        (TagType::NtagI2c2k, 485),
        (TagType::NtagI2cPlus1k, 236),
        (TagType::NtagI2cPlus2k, 492),
    ];
    for (tag_type, total) in expected {
        assert_eq!(tag_type.pages_total(), total, "{tag_type}");
    }
}

#[test]
fn auth_capable_types() {
    let with_auth: Vec<TagType> = TagType::ALL
        .into_iter()
        .filter(|t| t.supports(FeatureSet::PASSWORD_AUTH))
        .collect();
    assert_eq!(
        with_auth,
        vec![
            TagType::Ul11,
            TagType::Ul21,
            TagType::Ntag213,
            TagType::Ntag215,
            TagType::Ntag216,
            TagType::NtagI2cPlus1k,
            TagType::NtagI2cPlus2k,
        ]
    );
}

#[test]
fn ev1_has_three_counters_and_flags() {
    for t in [TagType::Ul11, TagType::Ul21] {
        assert!(t.supports(FeatureSet::READ_COUNTER | FeatureSet::CHECK_TEARING_FLAG));
        assert!(!t.supports(FeatureSet::SINGLE_COUNTER));
    }
}
