//! # Tenant Provisioning Tool
//!
//! Creates a store (tenant) and seeds its demo grocery catalog.
//!
//! ## Usage
//! ```bash
//! # Provision with defaults (slug: green-basket)
//! cargo run -p mandi-db --bin provision
//!
//! # Provision a custom store
//! cargo run -p mandi-db --bin provision -- \
//!     --slug city-mart --name "City Mart" --name-ar "سيتي مارت"
//!
//! # Specify database path
//! cargo run -p mandi-db --bin provision -- --db ./data/mandi.db
//! ```
//!
//! ## Seeded Catalog
//! Creates a realistic grocery catalog across categories:
//! - Produce (vegetables, fruits, herbs)
//! - Dairy (milk, laban, labneh, eggs)
//! - Bakery (breads, pastries)
//! - Pantry (rice, oil, pulses, dates)
//! - Beverages (water, juices)
//!
//! Each product has:
//! - Tenant-unique SKU: `{CATEGORY}-{INDEX}`
//! - English + Arabic display names
//! - Price in minor units with a display unit (kg, unit, pack, ...)
//! - A sale price on a rotating subset of items

use chrono::Utc;
use std::env;
use uuid::Uuid;

use mandi_core::{Product, Tenant};
use mandi_db::{Database, DbConfig};

/// Demo catalog: (category, sku prefix, items).
/// Item tuple: (name, localized name, unit, price in minor units).
const CATALOG: &[(&str, &str, &[(&str, &str, &str, i64)])] = &[
    (
        "produce",
        "PRO",
        &[
            ("Tomatoes", "طماطم", "kg", 450),
            ("Cucumbers", "خيار", "kg", 320),
            ("Potatoes", "بطاطس", "kg", 280),
            ("Onions", "بصل", "kg", 240),
            ("Carrots", "جزر", "kg", 260),
            ("Bananas", "موز", "kg", 520),
            ("Apples", "تفاح", "kg", 690),
            ("Oranges", "برتقال", "kg", 480),
            ("Lemons", "ليمون", "kg", 590),
            ("Parsley", "بقدونس", "bunch", 150),
        ],
    ),
    (
        "dairy",
        "DRY",
        &[
            ("Fresh Milk 1L", "حليب طازج ١ لتر", "unit", 650),
            ("Laban 1L", "لبن ١ لتر", "unit", 600),
            ("Labneh 400g", "لبنة ٤٠٠ غ", "unit", 850),
            ("Halloumi 250g", "حلوم ٢٥٠ غ", "unit", 1250),
            ("Greek Yogurt", "زبادي يوناني", "unit", 550),
            ("Butter 200g", "زبدة ٢٠٠ غ", "unit", 950),
            ("Eggs Tray of 30", "بيض ٣٠ حبة", "tray", 1750),
        ],
    ),
    (
        "bakery",
        "BKR",
        &[
            ("Arabic Bread", "خبز عربي", "pack", 200),
            ("Samoon", "صمون", "pack", 350),
            ("Croissant", "كرواسون", "unit", 450),
            ("Manakish Zaatar", "مناقيش زعتر", "unit", 550),
        ],
    ),
    (
        "pantry",
        "PNT",
        &[
            ("Basmati Rice 5kg", "أرز بسمتي ٥ كغ", "bag", 3950),
            ("Sunflower Oil 1.5L", "زيت دوار الشمس ١٫٥ لتر", "unit", 1450),
            ("Sugar 2kg", "سكر ٢ كغ", "bag", 850),
            ("Red Lentils 1kg", "عدس أحمر ١ كغ", "bag", 750),
            ("Chickpeas 1kg", "حمص ١ كغ", "bag", 680),
            ("Tomato Paste", "معجون طماطم", "unit", 320),
            ("Tahini 450g", "طحينة ٤٥٠ غ", "unit", 1150),
            ("Dates 1kg", "تمر ١ كغ", "box", 2450),
        ],
    ),
    (
        "beverages",
        "BEV",
        &[
            ("Drinking Water 12x600ml", "مياه شرب ١٢×٦٠٠ مل", "pack", 950),
            ("Orange Juice 1L", "عصير برتقال ١ لتر", "unit", 850),
            ("Sparkling Water", "مياه غازية", "unit", 350),
            ("Mint Lemonade", "ليمون بالنعناع", "unit", 650),
            ("Karak Tea", "شاي كرك", "unit", 250),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut slug = String::from("green-basket");
    let mut name = String::from("Green Basket");
    let mut name_localized = String::from("السلة الخضراء");
    let mut currency = String::from("SAR");
    let mut theme_color = String::from("#2e7d32");
    let mut db_path = String::from("./mandi_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--slug" | "-s" => {
                if i + 1 < args.len() {
                    slug = args[i + 1].clone();
                    i += 1;
                }
            }
            "--name" | "-n" => {
                if i + 1 < args.len() {
                    name = args[i + 1].clone();
                    i += 1;
                }
            }
            "--name-ar" => {
                if i + 1 < args.len() {
                    name_localized = args[i + 1].clone();
                    i += 1;
                }
            }
            "--currency" => {
                if i + 1 < args.len() {
                    currency = args[i + 1].clone();
                    i += 1;
                }
            }
            "--color" => {
                if i + 1 < args.len() {
                    theme_color = args[i + 1].clone();
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mandi Tenant Provisioning Tool");
                println!();
                println!("Usage: provision [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --slug <SLUG>     URL slug for the store (default: green-basket)");
                println!("  -n, --name <NAME>     Store display name (default: Green Basket)");
                println!("      --name-ar <NAME>  Localized store name");
                println!("      --currency <CUR>  ISO 4217 currency code (default: SAR)");
                println!("      --color <HEX>     Brand accent color (default: #2e7d32)");
                println!("  -d, --db <PATH>       Database file path (default: ./mandi_dev.db)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    mandi_core::validation::validate_slug(&slug)?;
    mandi_core::validation::validate_name(&name)?;

    println!("🌱 Mandi Tenant Provisioning");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Store:    {} ({})", name, slug);
    println!();

    // Connect to database (runs migrations)
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to provision the same slug twice
    if db.tenants().get_by_slug(&slug).await?.is_some() {
        println!("⚠ Store '{}' already exists", slug);
        println!("  Pick a different --slug or delete the database file.");
        return Ok(());
    }

    // Create the tenant
    let now = Utc::now();
    let tenant = Tenant {
        id: Uuid::new_v4().to_string(),
        slug: slug.clone(),
        name,
        name_localized,
        logo_url: None,
        theme_color: Some(theme_color),
        currency_code: currency,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.tenants().insert(&tenant).await?;

    println!("✓ Tenant created: {}", tenant.id);

    // Seed the catalog
    println!();
    println!("Seeding catalog...");

    let mut seeded = 0usize;
    let start = std::time::Instant::now();

    for (category, prefix, items) in CATALOG {
        for (idx, (item_name, item_name_ar, unit, price_cents)) in items.iter().enumerate() {
            let product = seed_product(
                &tenant.id, category, prefix, idx, item_name, item_name_ar, unit, *price_cents,
            );

            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.sku, e);
                continue;
            }

            seeded += 1;
        }
        println!("  {} ✓", category);
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Seeded {} products in {:?}", seeded, elapsed);

    // Verify FTS picks up the new rows
    println!();
    println!("Verifying search index...");
    let hits = db.products().search(&tenant.id, "tomato", 10).await?;
    println!("  Search 'tomato': {} results", hits.len());
    let hits = db.products().search(&tenant.id, "طماطم", 10).await?;
    println!("  Search 'طماطم': {} results", hits.len());

    println!();
    println!("✓ Provisioning complete! Storefront URL: /{}", slug);

    Ok(())
}

/// Builds one seeded catalog product.
#[allow(clippy::too_many_arguments)]
fn seed_product(
    tenant_id: &str,
    category: &str,
    prefix: &str,
    idx: usize,
    name: &str,
    name_localized: &str,
    unit: &str,
    price_cents: i64,
) -> Product {
    let now = Utc::now();

    // Every fourth item in a category goes on sale (~12% off)
    let sale_price_cents = if idx % 4 == 3 {
        Some(price_cents * 88 / 100)
    } else {
        None
    };

    Product {
        id: Uuid::new_v4().to_string(),
        tenant_id: tenant_id.to_string(),
        sku: format!("{}-{:03}", prefix, idx + 1),
        name: name.to_string(),
        name_localized: name_localized.to_string(),
        description: None,
        category: Some(category.to_string()),
        price_cents,
        sale_price_cents,
        unit: unit.to_string(),
        image_url: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
