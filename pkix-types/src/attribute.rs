//! Attribute names of distinguished names and their object identifiers.

use std::collections::HashMap;

use asn1::ObjectIdentifier;

/// Maps a symbolic attribute name (`CN`, `emailAddress`, ...) to its
/// object identifier.
pub trait OidLookup {
    fn lookup(&self, name: &str) -> Option<ObjectIdentifier>;
}

/// The attribute names of RFC 4514 plus the ones OpenSSL accepts in
/// `-subj`. Names match case-insensitively; a dotted OID is accepted as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAttributes;

impl StandardAttributes {
    pub const OID_COMMON_NAME: &'static str = "2.5.4.3";
    pub const OID_SURNAME: &'static str = "2.5.4.4";
    pub const OID_SERIAL_NUMBER: &'static str = "2.5.4.5";
    pub const OID_COUNTRY_NAME: &'static str = "2.5.4.6";
    pub const OID_LOCALITY_NAME: &'static str = "2.5.4.7";
    pub const OID_STATE_OR_PROVINCE_NAME: &'static str = "2.5.4.8";
    pub const OID_ORGANIZATION_NAME: &'static str = "2.5.4.10";
    pub const OID_ORGANIZATIONAL_UNIT_NAME: &'static str = "2.5.4.11";
    pub const OID_TITLE: &'static str = "2.5.4.12";
    pub const OID_GIVEN_NAME: &'static str = "2.5.4.42";
    pub const OID_USER_ID: &'static str = "0.9.2342.19200300.100.1.1";
    pub const OID_DOMAIN_COMPONENT: &'static str = "0.9.2342.19200300.100.1.25";
    pub const OID_EMAIL_ADDRESS: &'static str = "1.2.840.113549.1.9.1";

    // the first name of an OID is the one `name_of` reports
    const NAMES: &'static [(&'static str, &'static str)] = &[
        ("CN", Self::OID_COMMON_NAME),
        ("SN", Self::OID_SURNAME),
        ("SERIALNUMBER", Self::OID_SERIAL_NUMBER),
        ("C", Self::OID_COUNTRY_NAME),
        ("L", Self::OID_LOCALITY_NAME),
        ("ST", Self::OID_STATE_OR_PROVINCE_NAME),
        ("O", Self::OID_ORGANIZATION_NAME),
        ("OU", Self::OID_ORGANIZATIONAL_UNIT_NAME),
        ("T", Self::OID_TITLE),
        ("GN", Self::OID_GIVEN_NAME),
        ("UID", Self::OID_USER_ID),
        ("DC", Self::OID_DOMAIN_COMPONENT),
        ("emailAddress", Self::OID_EMAIL_ADDRESS),
        ("E", Self::OID_EMAIL_ADDRESS),
    ];

    /// The short name of a known attribute type.
    pub fn name_of(&self, oid: &ObjectIdentifier) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(_, dotted)| *oid == *dotted)
            .map(|(name, _)| *name)
    }
}

impl OidLookup for StandardAttributes {
    fn lookup(&self, name: &str) -> Option<ObjectIdentifier> {
        Self::NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .and_then(|(_, dotted)| dotted.parse().ok())
            .or_else(|| name.parse().ok())
    }
}

impl OidLookup for HashMap<String, ObjectIdentifier> {
    fn lookup(&self, name: &str) -> Option<ObjectIdentifier> {
        self.get(name).cloned()
    }
}
