//! Province → district → ward selection state.
//!
//! Each level depends on its parent: choosing a province clears district and
//! ward, choosing a district clears the ward. Only "parent must be selected"
//! is enforced; codes are not cross-checked between levels.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// One entry of a province/district/ward dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOption {
    pub label: String,
    pub value: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressLevel {
    Province,
    District,
    Ward,
}

impl std::fmt::Display for AddressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressLevel::Province => write!(f, "province"),
            AddressLevel::District => write!(f, "district"),
            AddressLevel::Ward => write!(f, "ward"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSelection {
    province: Option<LocationOption>,
    district: Option<LocationOption>,
    ward: Option<LocationOption>,
    street: String,
}

impl AddressSelection {
    #[must_use]
    pub fn province(&self) -> Option<&LocationOption> {
        self.province.as_ref()
    }

    #[must_use]
    pub fn district(&self) -> Option<&LocationOption> {
        self.district.as_ref()
    }

    #[must_use]
    pub fn ward(&self) -> Option<&LocationOption> {
        self.ward.as_ref()
    }

    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Selects a province and clears the dependent levels.
    pub fn select_province(&mut self, province: LocationOption) {
        self.province = Some(province);
        self.district = None;
        self.ward = None;
    }

    /// Selects a district and clears the ward.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ParentNotSelected`] when no province is selected.
    pub fn select_district(&mut self, district: LocationOption) -> Result<(), CoreError> {
        if self.province.is_none() {
            return Err(CoreError::ParentNotSelected {
                child: "district",
                parent: "province",
            });
        }
        self.district = Some(district);
        self.ward = None;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::ParentNotSelected`] when no district is selected.
    pub fn select_ward(&mut self, ward: LocationOption) -> Result<(), CoreError> {
        if self.district.is_none() {
            return Err(CoreError::ParentNotSelected {
                child: "ward",
                parent: "district",
            });
        }
        self.ward = Some(ward);
        Ok(())
    }

    pub fn set_street(&mut self, street: impl Into<String>) {
        self.street = street.into();
    }

    #[must_use]
    pub fn district_enabled(&self) -> bool {
        self.province.is_some()
    }

    #[must_use]
    pub fn ward_enabled(&self) -> bool {
        self.district.is_some()
    }

    /// The deepest level still waiting for a choice.
    #[must_use]
    pub fn pending_level(&self) -> Option<AddressLevel> {
        if self.province.is_none() {
            Some(AddressLevel::Province)
        } else if self.district.is_none() {
            Some(AddressLevel::District)
        } else if self.ward.is_none() {
            Some(AddressLevel::Ward)
        } else {
            None
        }
    }

    /// All three levels chosen and a non-blank street entered.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.pending_level().is_none() && !self.street.trim().is_empty()
    }

    /// `"<street>, <ward>, <district>, <province>"`, or `None` until
    /// [`Self::can_confirm`] holds.
    #[must_use]
    pub fn full_address(&self) -> Option<String> {
        if !self.can_confirm() {
            return None;
        }
        let (province, district, ward) = (
            self.province.as_ref()?,
            self.district.as_ref()?,
            self.ward.as_ref()?,
        );
        Some(format!(
            "{}, {}, {}, {}",
            self.street.trim(),
            ward.label,
            district.label,
            province.label
        ))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(label: &str, code: &str) -> LocationOption {
        LocationOption {
            label: label.to_string(),
            value: code.to_string(),
            code: code.to_string(),
        }
    }

    fn complete() -> AddressSelection {
        let mut sel = AddressSelection::default();
        sel.select_province(opt("Hà Nội", "01"));
        sel.select_district(opt("Ba Đình", "001")).unwrap();
        sel.select_ward(opt("Phúc Xá", "00001")).unwrap();
        sel.set_street("12 Hàng Bông");
        sel
    }

    #[test]
    fn district_rejected_without_province() {
        let mut sel = AddressSelection::default();
        assert!(!sel.district_enabled());
        let err = sel.select_district(opt("Ba Đình", "001")).unwrap_err();
        assert_eq!(
            err,
            CoreError::ParentNotSelected {
                child: "district",
                parent: "province"
            }
        );
        assert!(sel.district().is_none());
    }

    #[test]
    fn ward_disabled_without_district() {
        let mut sel = AddressSelection::default();
        sel.select_province(opt("Hà Nội", "01"));
        assert!(sel.district_enabled());
        assert!(!sel.ward_enabled());
        assert!(sel.select_ward(opt("Phúc Xá", "00001")).is_err());
    }

    #[test]
    fn selecting_province_clears_district_and_ward() {
        let mut sel = complete();
        sel.select_province(opt("Hồ Chí Minh", "79"));
        assert!(sel.district().is_none());
        assert!(sel.ward().is_none());
        assert_eq!(sel.street(), "12 Hàng Bông");
        assert_eq!(sel.pending_level(), Some(AddressLevel::District));
    }

    #[test]
    fn selecting_district_clears_ward() {
        let mut sel = complete();
        sel.select_district(opt("Hoàn Kiếm", "002")).unwrap();
        assert!(sel.ward().is_none());
        assert!(!sel.can_confirm());
    }

    #[test]
    fn confirm_requires_street() {
        let mut sel = complete();
        assert!(sel.can_confirm());
        sel.set_street("   ");
        assert!(!sel.can_confirm());
        assert!(sel.full_address().is_none());
    }

    #[test]
    fn full_address_joins_levels() {
        assert_eq!(
            complete().full_address().as_deref(),
            Some("12 Hàng Bông, Phúc Xá, Ba Đình, Hà Nội")
        );
    }

    #[test]
    fn reset_clears_everything() {
        let mut sel = complete();
        sel.reset();
        assert_eq!(sel, AddressSelection::default());
        assert_eq!(sel.pending_level(), Some(AddressLevel::Province));
    }
}
