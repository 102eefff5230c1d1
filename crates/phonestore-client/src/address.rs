//! Shipping address controller: province → district → ward dropdowns backed
//! by the address lookup endpoints.

use phonestore_core::address::AddressLevel;
use phonestore_core::{AddressSelection, CoreError, LocationOption, Notice, Session};

use crate::client::StorefrontClient;
use crate::types::UserProfile;

/// Dropdown options and selection for the address dialog.
///
/// Lookup failures never block the form: the affected list is left empty,
/// a notice is returned, and the parent level stays selectable so the user
/// can pick again.
#[derive(Debug)]
pub struct AddressCascade {
    client: StorefrontClient,
    selection: AddressSelection,
    provinces: Vec<LocationOption>,
    districts: Vec<LocationOption>,
    wards: Vec<LocationOption>,
    profile: Option<UserProfile>,
}

impl AddressCascade {
    #[must_use]
    pub fn new(client: StorefrontClient) -> Self {
        Self {
            client,
            selection: AddressSelection::default(),
            provinces: Vec::new(),
            districts: Vec::new(),
            wards: Vec::new(),
            profile: None,
        }
    }

    #[must_use]
    pub fn selection(&self) -> &AddressSelection {
        &self.selection
    }

    #[must_use]
    pub fn provinces(&self) -> &[LocationOption] {
        &self.provinces
    }

    #[must_use]
    pub fn districts(&self) -> &[LocationOption] {
        &self.districts
    }

    #[must_use]
    pub fn wards(&self) -> &[LocationOption] {
        &self.wards
    }

    /// Profile fetched after the last successful confirmation.
    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Finds an option of `level` by code, value, or case-insensitive label.
    #[must_use]
    pub fn find(&self, level: AddressLevel, needle: &str) -> Option<&LocationOption> {
        let options = match level {
            AddressLevel::Province => &self.provinces,
            AddressLevel::District => &self.districts,
            AddressLevel::Ward => &self.wards,
        };
        let needle = needle.trim();
        options.iter().find(|o| {
            o.code.eq_ignore_ascii_case(needle)
                || o.value == needle
                || o.label.to_lowercase() == needle.to_lowercase()
        })
    }

    /// Loads the province list.
    pub async fn load_provinces(&mut self) -> Option<Notice> {
        match self.client.provinces().await {
            Ok(provinces) => {
                self.provinces = provinces;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load provinces");
                self.provinces.clear();
                Some(Notice::warn(
                    "Address lookup failed",
                    "Could not load the list of provinces",
                ))
            }
        }
    }

    /// Selects a province, clears district and ward, and loads its districts.
    pub async fn select_province(&mut self, province: LocationOption) -> Option<Notice> {
        let code = province.code.clone();
        self.selection.select_province(province);
        self.districts.clear();
        self.wards.clear();

        match self.client.districts(&code).await {
            Ok(districts) => {
                self.districts = districts;
                None
            }
            Err(e) => {
                tracing::warn!(province = %code, error = %e, "failed to load districts");
                Some(Notice::warn(
                    "Address lookup failed",
                    "Could not load districts; please choose the province again",
                ))
            }
        }
    }

    /// Selects a district, clears the ward, and loads its wards.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ParentNotSelected`] without a province; nothing
    /// is fetched.
    pub async fn select_district(
        &mut self,
        district: LocationOption,
    ) -> Result<Option<Notice>, CoreError> {
        let code = district.code.clone();
        self.selection.select_district(district)?;
        self.wards.clear();

        Ok(match self.client.wards(&code).await {
            Ok(wards) => {
                self.wards = wards;
                None
            }
            Err(e) => {
                tracing::warn!(district = %code, error = %e, "failed to load wards");
                Some(Notice::warn(
                    "Address lookup failed",
                    "Could not load wards; please choose the district again",
                ))
            }
        })
    }

    /// # Errors
    ///
    /// Returns [`CoreError::ParentNotSelected`] without a district.
    pub fn select_ward(&mut self, ward: LocationOption) -> Result<(), CoreError> {
        self.selection.select_ward(ward)
    }

    pub fn set_street(&mut self, street: impl Into<String>) {
        self.selection.set_street(street);
    }

    /// Saves the composed address to the user's profile, then refreshes the
    /// profile and resets the form.
    ///
    /// An incomplete form is reported without any request. A failed profile
    /// refresh is logged but does not undo the saved address.
    pub async fn confirm(&mut self, session: &Session) -> Notice {
        let Some(address) = self.selection.full_address() else {
            return Notice::warn(
                "Incomplete address",
                "Select every address level and enter a street address",
            );
        };

        if let Err(e) = self.client.update_address(session, &address).await {
            tracing::error!(error = %e, "address update failed");
            return Notice::from(&e);
        }

        match self.client.get_profile(session).await {
            Ok(profile) => self.profile = Some(profile),
            Err(e) => tracing::warn!(error = %e, "failed to refresh profile after address update"),
        }

        self.selection.reset();
        self.districts.clear();
        self.wards.clear();
        tracing::info!(address = %address, "shipping address updated");
        Notice::success("Address updated", address)
    }
}
