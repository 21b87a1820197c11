//! SeaORM entity definitions
//!
//! One module per table. Domain conversions live in the postgres adapters.

pub mod accessories;
pub mod analyses;
pub mod analysis_parts;
pub mod companies;
pub mod entry_accessories;
pub mod entry_equipments;
pub mod equip_marks;
pub mod equip_models;
pub mod equip_types;
pub mod equips;
pub mod part_equip_models;
pub mod parts;
pub mod sessions;
pub mod type_accounts;
pub mod users;
