//! Fixed seed catalog: the managed hotels, their room numbers and the
//! checklist every room starts with.

use crate::model::checklist::ChecklistCategory;
use crate::model::hotel::Hotel;
use std::ops::RangeInclusive;

/// Room numbers created for every hotel.
pub const ROOM_NUMBERS: RangeInclusive<u32> = 1001..=1010;

/// Hotel count the seeder expects once seeding has completed.
pub const EXPECTED_HOTEL_COUNT: usize = HOTEL_CATALOG.len();

pub struct HotelSeed {
    pub hotel_id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub image_url: &'static str,
}

impl HotelSeed {
    pub fn to_hotel(&self) -> Hotel {
        Hotel {
            hotel_id: self.hotel_id.to_string(),
            name: self.name.to_string(),
            location: self.location.to_string(),
            image_url: self.image_url.to_string(),
        }
    }
}

pub const HOTEL_CATALOG: [HotelSeed; 2] = [
    HotelSeed {
        hotel_id: "palm",
        name: "One&Only The Palm",
        location: "Palm Jumeirah, Dubai",
        image_url: "https://www.oneandonlyresorts.com/-/media/oneandonly/the-palm/homepage/ootp-hero-image.jpg",
    },
    HotelSeed {
        hotel_id: "difc",
        name: "One&Only DIFC",
        location: "DIFC, Dubai",
        image_url: "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800",
    },
];

/// Checklist template, grouped by section in display order.
pub const CHECKLIST_CATALOG: [(ChecklistCategory, &str); 33] = [
    (ChecklistCategory::Bedroom, "Bed made with fresh linen"),
    (ChecklistCategory::Bedroom, "Pillows arranged correctly"),
    (ChecklistCategory::Bedroom, "Duvet/bedspread straightened"),
    (ChecklistCategory::Bedroom, "Nightstand cleared and wiped"),
    (ChecklistCategory::Bedroom, "All lights tested and working"),
    (ChecklistCategory::Bedroom, "TV and remote functional"),
    (ChecklistCategory::Bedroom, "AC/heating set to default temperature"),
    (ChecklistCategory::Bedroom, "Curtains/blinds clean and operational"),
    (ChecklistCategory::Bedroom, "Floors vacuumed"),
    (ChecklistCategory::Bedroom, "Surfaces dusted"),
    (ChecklistCategory::Bathroom, "Toilet cleaned inside and out"),
    (ChecklistCategory::Bathroom, "Sink and countertop wiped clean"),
    (ChecklistCategory::Bathroom, "Mirror polished"),
    (ChecklistCategory::Bathroom, "Shower/tub scrubbed"),
    (ChecklistCategory::Bathroom, "Floor mopped and dry"),
    (ChecklistCategory::Bathroom, "Fresh towels placed (bath, hand, face)"),
    (ChecklistCategory::Bathroom, "Bathrobe and slippers placed"),
    (
        ChecklistCategory::Bathroom,
        "Toiletries restocked (shampoo, conditioner, body wash, soap)",
    ),
    (ChecklistCategory::Bathroom, "Toilet paper replaced"),
    (ChecklistCategory::Bathroom, "Bin emptied and relined"),
    (ChecklistCategory::Amenities, "Minibar restocked and checked"),
    (ChecklistCategory::Amenities, "Coffee/tea station restocked"),
    (ChecklistCategory::Amenities, "Water bottles placed"),
    (ChecklistCategory::Amenities, "Welcome amenities in place"),
    (ChecklistCategory::Amenities, "In-room dining menu present"),
    (ChecklistCategory::Amenities, "Safe operational"),
    (ChecklistCategory::Amenities, "Iron and ironing board present"),
    (ChecklistCategory::Amenities, "Luggage rack in place"),
    (ChecklistCategory::FinalInspection, "Room fragrance applied"),
    (ChecklistCategory::FinalInspection, "All windows/doors checked"),
    (ChecklistCategory::FinalInspection, "No maintenance issues noted"),
    (ChecklistCategory::FinalInspection, "Room sign/DND card in place"),
    (ChecklistCategory::FinalInspection, "Overall presentation check"),
];

#[cfg(test)]
mod tests {
    use super::{CHECKLIST_CATALOG, HOTEL_CATALOG, ROOM_NUMBERS};
    use crate::model::checklist::ChecklistCategory;
    use std::collections::HashSet;

    #[test]
    fn checklist_catalog_has_expected_section_sizes() {
        let count = |category| {
            CHECKLIST_CATALOG
                .iter()
                .filter(|(c, _)| *c == category)
                .count()
        };
        assert_eq!(count(ChecklistCategory::Bedroom), 10);
        assert_eq!(count(ChecklistCategory::Bathroom), 10);
        assert_eq!(count(ChecklistCategory::Amenities), 8);
        assert_eq!(count(ChecklistCategory::FinalInspection), 5);
    }

    #[test]
    fn catalog_names_and_ids_are_unique() {
        let names: HashSet<_> = CHECKLIST_CATALOG.iter().map(|(_, name)| *name).collect();
        assert_eq!(names.len(), CHECKLIST_CATALOG.len());
        let hotels: HashSet<_> = HOTEL_CATALOG.iter().map(|h| h.hotel_id).collect();
        assert_eq!(hotels.len(), HOTEL_CATALOG.len());
        assert_eq!(ROOM_NUMBERS.count(), 10);
    }
}
