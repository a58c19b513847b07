// src/domain/defaults.rs

use crate::domain::property::{Coordinates, FloorPlan, Property, STATUS_FOR_RENT, STATUS_FOR_SALE};

/// The built-in listing set.
///
/// Served when local storage holds nothing usable and when the hosted catalog
/// is unreachable or empty. Always returns the same values.
pub fn default_properties() -> Vec<Property> {
    vec![
        Property {
            id: "default-1".to_string(),
            title: "Skyline Residences".to_string(),
            location: "Worli, Mumbai".to_string(),
            price: "₹ 5.5 Cr".to_string(),
            beds: Some(3),
            baths: Some(3),
            area: Some("1,850 sq.ft".to_string()),
            status: Some(STATUS_FOR_SALE.to_string()),
            bhk_type: Some("3 BHK".to_string()),
            property_type: Some("Apartment".to_string()),
            developer: Some("Horizon Developers".to_string()),
            description: Some(
                "Sea-facing apartment with a private deck and concierge services.".to_string(),
            ),
            images: vec!["/images/properties/skyline-1.jpg".to_string()],
            amenities: vec![
                "Swimming Pool".to_string(),
                "Gym".to_string(),
                "Clubhouse".to_string(),
            ],
            floor_plans: vec![FloorPlan {
                name: "3 BHK Type A".to_string(),
                area: Some("1,850 sq.ft".to_string()),
                price: Some("₹ 5.5 Cr".to_string()),
                image: None,
            }],
            coordinates: Some(Coordinates {
                lat: 19.0176,
                lng: 72.8172,
            }),
            created_at: None,
        },
        Property {
            id: "default-2".to_string(),
            title: "Palm Grove Villa".to_string(),
            location: "Whitefield, Bengaluru".to_string(),
            price: "₹ 3.2 Cr".to_string(),
            beds: Some(4),
            baths: Some(4),
            area: Some("3,400 sq.ft".to_string()),
            status: Some(STATUS_FOR_SALE.to_string()),
            bhk_type: Some("4 BHK".to_string()),
            property_type: Some("Villa".to_string()),
            developer: Some("Greenfield Estates".to_string()),
            description: Some("Gated villa community with landscaped gardens.".to_string()),
            images: vec!["/images/properties/palm-grove-1.jpg".to_string()],
            amenities: vec!["Garden".to_string(), "Security".to_string()],
            floor_plans: Vec::new(),
            coordinates: Some(Coordinates {
                lat: 12.9698,
                lng: 77.7500,
            }),
            created_at: None,
        },
        Property {
            id: "default-3".to_string(),
            title: "Metro Heights".to_string(),
            location: "Andheri East, Mumbai".to_string(),
            price: "₹ 65,000 / month".to_string(),
            beds: Some(2),
            baths: Some(2),
            area: Some("1,050 sq.ft".to_string()),
            status: Some(STATUS_FOR_RENT.to_string()),
            bhk_type: Some("2 BHK".to_string()),
            property_type: Some("Apartment".to_string()),
            developer: None,
            description: Some("Furnished flat a short walk from the metro.".to_string()),
            images: vec!["/images/properties/metro-heights-1.jpg".to_string()],
            amenities: vec!["Power Backup".to_string(), "Lift".to_string()],
            floor_plans: Vec::new(),
            coordinates: None,
            created_at: None,
        },
        Property {
            id: "default-4".to_string(),
            title: "Commerce Point".to_string(),
            location: "Baner, Pune".to_string(),
            price: "₹ 1.1 Cr".to_string(),
            beds: None,
            baths: Some(1),
            area: Some("900 sq.ft".to_string()),
            status: Some(STATUS_FOR_SALE.to_string()),
            bhk_type: None,
            property_type: Some("Office Space".to_string()),
            developer: Some("Horizon Developers".to_string()),
            description: None,
            images: Vec::new(),
            amenities: vec!["Parking".to_string()],
            floor_plans: Vec::new(),
            coordinates: None,
            created_at: None,
        },
    ]
}
