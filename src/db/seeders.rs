//! Database seeders for built-in data
//!
//! The demo ships with a fixed set of hotels. Seeding inserts every sample
//! hotel whose name is not already present, so running it repeatedly is safe.

use tracing::{debug, info};

use super::{create_document, DocumentStore, Entity, Filter, Hotel, StoreError};

/// The fixed demo hotels
pub fn sample_hotels() -> Vec<Hotel> {
    vec![
        Hotel {
            name: "Seaside Paradise Resort".to_string(),
            city: "Miami".to_string(),
            description: "Oceanfront resort with private beach, pool, and spa.".to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1501117716987-c8e3f71b1e47".to_string(),
                "https://images.unsplash.com/photo-1559599238-0f8c2f66a7e3".to_string(),
            ],
            price_per_night: 219.0,
            rating: 4.6,
        },
        Hotel {
            name: "Urban Chic Hotel".to_string(),
            city: "New York".to_string(),
            description: "Boutique hotel in the heart of the city with skyline views.".to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267".to_string(),
                "https://images.unsplash.com/photo-1509057199576-632a47484ece".to_string(),
            ],
            price_per_night: 299.0,
            rating: 4.7,
        },
        Hotel {
            name: "Mountain Escape Lodge".to_string(),
            city: "Denver".to_string(),
            description: "Cozy lodge with mountain views, hiking access, and hot tubs.".to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1505691938895-1758d7feb511".to_string(),
                "https://images.unsplash.com/photo-1507679799987-c73779587ccf".to_string(),
            ],
            price_per_night: 189.0,
            rating: 4.5,
        },
    ]
}

/// Insert missing sample hotels; returns how many were inserted
pub async fn seed_hotels(store: &dyn DocumentStore) -> Result<usize, StoreError> {
    info!("Seeding sample hotels...");

    let mut inserted = 0;
    for hotel in sample_hotels() {
        let existing = store
            .find_one(Hotel::COLLECTION, &Filter::new().eq("name", hotel.name.as_str()))
            .await?;

        if existing.is_some() {
            debug!(name = %hotel.name, "Sample hotel already present");
            continue;
        }

        create_document(store, &hotel).await?;
        inserted += 1;
    }

    info!(inserted, "Sample hotels seeded");
    Ok(inserted)
}
