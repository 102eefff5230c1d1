use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["phonestore"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_product_show() {
    let cli = Cli::try_parse_from(["phonestore", "product", "show", "iphone-15-128gb"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Product {
            command: ProductCommands::Show { ref slug }
        }) if slug == "iphone-15-128gb"
    ));
}

#[test]
fn parses_product_variants_with_storage() {
    let cli = Cli::try_parse_from([
        "phonestore",
        "product",
        "variants",
        "galaxy-s24-8gb-256gb",
        "--storage",
        "512GB",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Product {
            command: ProductCommands::Variants {
                storage: Some(ref s),
                ..
            }
        }) if s == "512GB"
    ));
}

#[test]
fn parses_product_hot() {
    let cli = Cli::try_parse_from(["phonestore", "product", "hot"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Product {
            command: ProductCommands::Hot
        })
    ));
}

#[test]
fn compare_defaults_to_all_rows() {
    let cli = Cli::try_parse_from(["phonestore", "compare", "a-128gb-vs-b-256gb"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Compare {
            ref path,
            ref add,
            ref fields,
            diff_only: false,
            ..
        }) if path == "a-128gb-vs-b-256gb" && add.is_empty() && fields.is_empty()
    ));
}

#[test]
fn compare_collects_repeated_edits() {
    let cli = Cli::try_parse_from([
        "phonestore",
        "compare",
        "--add",
        "iphone-15-128gb",
        "--add",
        "galaxy-s24-8gb-256gb",
        "--remove",
        "p1",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Compare {
            ref path,
            ref add,
            ref remove,
            ..
        }) if path.is_empty() && add.len() == 2 && remove == &["p1".to_string()]
    ));
}

#[test]
fn compare_field_accepts_either_spelling() {
    let cli = Cli::try_parse_from([
        "phonestore",
        "compare",
        "a-vs-b",
        "--field",
        "rearCamera",
        "--field",
        "refresh_rate",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Compare { ref fields, .. })
            if fields == &[CompareField::RearCamera, CompareField::RefreshRate]
    ));
}

#[test]
fn compare_rejects_unknown_field() {
    let result = Cli::try_parse_from(["phonestore", "compare", "a-vs-b", "--field", "weight"]);
    assert!(result.is_err());
}

#[test]
fn compare_diff_only_flag() {
    let cli =
        Cli::try_parse_from(["phonestore", "compare", "a-128gb-vs-b-256gb", "--diff-only"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Compare {
            diff_only: true,
            ..
        })
    ));
}

#[test]
fn parses_cart_add_buy_now() {
    let cli = Cli::try_parse_from([
        "phonestore",
        "cart",
        "add",
        "iphone-15-128gb",
        "--storage",
        "256GB",
        "--buy-now",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Add {
                storage: Some(ref s),
                buy_now: true,
                ..
            }
        }) if s == "256GB"
    ));
}

#[test]
fn address_set_requires_every_level() {
    let result = Cli::try_parse_from([
        "phonestore",
        "address",
        "set",
        "--province",
        "01",
        "--district",
        "001",
        "--street",
        "12 Hàng Bông",
    ]);
    assert!(result.is_err(), "missing --ward must be rejected");
}

#[test]
fn parses_address_wards() {
    let cli = Cli::try_parse_from(["phonestore", "address", "wards", "01", "001"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Address {
            command: AddressCommands::Wards { ref province, ref district }
        }) if province == "01" && district == "001"
    ));
}

#[test]
fn parses_news_list_with_search() {
    let cli = Cli::try_parse_from(["phonestore", "news", "list", "--search", "tet"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::News {
            command: NewsCommands::List { search: Some(ref q) }
        }) if q == "tet"
    ));
}

#[test]
fn news_save_without_id_creates() {
    let cli = Cli::try_parse_from([
        "phonestore",
        "news",
        "save",
        "--title",
        "Summer sale",
        "--subtitle",
        "Up to 20% off",
        "--link",
        "/promotions/summer",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::News {
            command: NewsCommands::Save {
                id: None,
                image: None,
                external: false,
                ..
            }
        })
    ));
}

#[test]
fn news_delete_defaults_to_prompting() {
    let cli = Cli::try_parse_from(["phonestore", "news", "delete", "n1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::News {
            command: NewsCommands::Delete { yes: false, .. }
        })
    ));
}

#[test]
fn parses_reviews() {
    let cli = Cli::try_parse_from(["phonestore", "reviews", "iphone-15-128gb"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Reviews { ref slug }) if slug == "iphone-15-128gb"
    ));
}

#[test]
fn parses_rate_with_photos() {
    let cli = Cli::try_parse_from([
        "phonestore",
        "rate",
        "iphone-15-128gb",
        "--rating",
        "5",
        "--name",
        "An",
        "--phone",
        "0901234567",
        "--comment",
        "Great battery",
        "--image",
        "front.jpg",
        "--image",
        "back.jpg",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Rate {
            rating: 5,
            ref comment,
            ref images,
            ..
        }) if comment == "Great battery" && images.len() == 2
    ));
}

#[test]
fn rate_requires_a_rating() {
    let result = Cli::try_parse_from([
        "phonestore", "rate", "iphone-15-128gb", "--name", "An", "--phone", "0901234567",
    ]);
    assert!(result.is_err());
}

#[test]
fn fmt_vnd_groups_thousands() {
    assert_eq!(fmt_vnd(20_690_000), "20.690.000 \u{20ab}");
    assert_eq!(fmt_vnd(999), "999 \u{20ab}");
    assert_eq!(fmt_vnd(0), "0 \u{20ab}");
}

#[test]
fn report_fails_only_on_error_severity() {
    assert!(report(&Notice::success("Saved", "ok")).is_ok());
    assert!(report(&Notice::warn("Incomplete", "fill in the title")).is_ok());
    assert!(report(&Notice::error("Login required", "please log in")).is_err());
}
