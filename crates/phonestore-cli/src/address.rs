//! Address lookup and shipping-address update.
//!
//! `set` walks the same province → district → ward cascade as the address
//! dialog, matching each argument by code or name.

use clap::Subcommand;
use phonestore_client::AddressCascade;
use phonestore_core::address::AddressLevel;
use phonestore_core::{LocationOption, Notice};

use crate::{report, Context};

/// Sub-commands available under `address`.
#[derive(Debug, Subcommand)]
pub enum AddressCommands {
    /// List provinces
    Provinces,
    /// List districts of a province
    Districts {
        /// Province code or name
        province: String,
    },
    /// List wards of a district
    Wards {
        /// Province code or name
        province: String,
        /// District code or name
        district: String,
    },
    /// Save a shipping address to the logged-in user's profile
    Set {
        #[arg(long)]
        province: String,
        #[arg(long)]
        district: String,
        #[arg(long)]
        ward: String,
        /// House number and street
        #[arg(long)]
        street: String,
    },
}

fn print_options(options: &[LocationOption]) {
    for o in options {
        println!("{:<10}{}", o.code, o.label);
    }
}

/// Looks up `needle` at `level`, reporting an unknown value as a warning.
fn pick(cascade: &AddressCascade, level: AddressLevel, needle: &str) -> Option<LocationOption> {
    let found = cascade.find(level, needle).cloned();
    if found.is_none() {
        eprintln!(
            "{}",
            Notice::warn("Unknown address", format!("no {level} matches \"{needle}\""))
        );
    }
    found
}

/// Reports a lookup notice; returns `true` if the cascade may continue.
fn lookup_ok(notice: Option<Notice>) -> anyhow::Result<bool> {
    match notice {
        Some(notice) => report(&notice).map(|()| false),
        None => Ok(true),
    }
}

pub(crate) async fn run(ctx: &Context, command: AddressCommands) -> anyhow::Result<()> {
    let mut cascade = AddressCascade::new(ctx.client.clone());
    if !lookup_ok(cascade.load_provinces().await)? {
        return Ok(());
    }

    match command {
        AddressCommands::Provinces => print_options(cascade.provinces()),
        AddressCommands::Districts { province } => {
            let Some(province) = pick(&cascade, AddressLevel::Province, &province) else {
                return Ok(());
            };
            if lookup_ok(cascade.select_province(province).await)? {
                print_options(cascade.districts());
            }
        }
        AddressCommands::Wards { province, district } => {
            let Some(province) = pick(&cascade, AddressLevel::Province, &province) else {
                return Ok(());
            };
            if !lookup_ok(cascade.select_province(province).await)? {
                return Ok(());
            }
            let Some(district) = pick(&cascade, AddressLevel::District, &district) else {
                return Ok(());
            };
            if lookup_ok(cascade.select_district(district).await?)? {
                print_options(cascade.wards());
            }
        }
        AddressCommands::Set {
            province,
            district,
            ward,
            street,
        } => {
            let Some(province) = pick(&cascade, AddressLevel::Province, &province) else {
                return Ok(());
            };
            if !lookup_ok(cascade.select_province(province).await)? {
                return Ok(());
            }
            let Some(district) = pick(&cascade, AddressLevel::District, &district) else {
                return Ok(());
            };
            if !lookup_ok(cascade.select_district(district).await?)? {
                return Ok(());
            }
            let Some(ward) = pick(&cascade, AddressLevel::Ward, &ward) else {
                return Ok(());
            };
            cascade.select_ward(ward)?;
            cascade.set_street(street);

            report(&cascade.confirm(&ctx.session).await)?;
            if let Some(profile) = cascade.profile() {
                println!("{} \u{00b7} {}", profile.full_name, profile.phone_number);
                println!("ships to: {}", profile.address);
            }
        }
    }
    Ok(())
}
