//! Table bootstrap
//!
//! Ensures every table exists before the server starts accepting requests.

use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::{debug, info};

use crate::error::DomainError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS companies (
    id UUID PRIMARY KEY,
    razao_social TEXT NOT NULL UNIQUE,
    cnpj TEXT NOT NULL UNIQUE,
    street TEXT NOT NULL,
    number TEXT NOT NULL,
    complement TEXT,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    neighborhood TEXT NOT NULL,
    reference_point TEXT,
    zip_code TEXT NOT NULL,
    telephone TEXT NOT NULL,
    email TEXT NOT NULL,
    name_contact TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS equip_types (
    id UUID PRIMARY KEY,
    kind TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS equip_marks (
    id UUID PRIMARY KEY,
    equip_type_id UUID NOT NULL REFERENCES equip_types (id),
    mark TEXT NOT NULL,
    responsible_user TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (equip_type_id, mark)
);

CREATE TABLE IF NOT EXISTS equip_models (
    id UUID PRIMARY KEY,
    equip_mark_id UUID NOT NULL REFERENCES equip_marks (id),
    model TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    responsible_user TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS idx_equip_models_mark_model ON equip_models (equip_mark_id, model);

CREATE TABLE IF NOT EXISTS equips (
    id UUID PRIMARY KEY,
    company_id UUID NOT NULL REFERENCES companies (id),
    equip_model_id UUID NOT NULL REFERENCES equip_models (id),
    serial_number TEXT NOT NULL UNIQUE,
    reader_color TEXT NOT NULL,
    badge_type TEXT NOT NULL,
    details TEXT,
    proximity BOOLEAN NOT NULL DEFAULT FALSE,
    bio BOOLEAN NOT NULL DEFAULT FALSE,
    barcode BOOLEAN NOT NULL DEFAULT FALSE,
    cartographic BOOLEAN NOT NULL DEFAULT FALSE,
    responsible_user TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS accessories (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    responsible_user TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS entry_equipments (
    id UUID PRIMARY KEY,
    equip_id UUID NOT NULL REFERENCES equips (id),
    external_damage BOOLEAN NOT NULL,
    details TEXT,
    defect TEXT NOT NULL,
    delivery TEXT NOT NULL,
    client_name TEXT,
    rg TEXT,
    cpf TEXT,
    sender_name TEXT,
    properly_packed BOOLEAN,
    zip_code TEXT,
    state TEXT,
    city TEXT,
    neighborhood TEXT,
    street TEXT,
    number TEXT,
    motoboy_name TEXT,
    responsible_name TEXT,
    technician_name TEXT,
    status TEXT NOT NULL DEFAULT 'analise',
    responsible_user TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS idx_entry_equipments_status ON entry_equipments (status);

CREATE TABLE IF NOT EXISTS entry_accessories (
    entry_equipment_id UUID NOT NULL REFERENCES entry_equipments (id) ON DELETE CASCADE,
    accessory_id UUID NOT NULL REFERENCES accessories (id),
    PRIMARY KEY (entry_equipment_id, accessory_id)
);

CREATE TABLE IF NOT EXISTS parts (
    id UUID PRIMARY KEY,
    item TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    cost_price BIGINT NOT NULL,
    sale_price BIGINT NOT NULL,
    obsolete BOOLEAN NOT NULL DEFAULT FALSE,
    responsible_user TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS part_equip_models (
    part_id UUID NOT NULL REFERENCES parts (id) ON DELETE CASCADE,
    equip_model_id UUID NOT NULL REFERENCES equip_models (id),
    PRIMARY KEY (part_id, equip_model_id)
);

CREATE TABLE IF NOT EXISTS type_accounts (
    id UUID PRIMARY KEY,
    type_name TEXT NOT NULL UNIQUE,
    add_company BOOLEAN NOT NULL DEFAULT FALSE,
    add_part BOOLEAN NOT NULL DEFAULT FALSE,
    add_analyze BOOLEAN NOT NULL DEFAULT FALSE,
    add_equip BOOLEAN NOT NULL DEFAULT FALSE,
    add_entry BOOLEAN NOT NULL DEFAULT FALSE,
    add_equip_type BOOLEAN NOT NULL DEFAULT FALSE,
    tecnico BOOLEAN NOT NULL DEFAULT FALSE,
    add_accessories BOOLEAN NOT NULL DEFAULT FALSE,
    add_user BOOLEAN NOT NULL DEFAULT FALSE,
    add_type_account BOOLEAN NOT NULL DEFAULT FALSE,
    responsible_user TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    type_account_id UUID NOT NULL REFERENCES type_accounts (id),
    responsible_user TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS sessions (
    token_hash TEXT PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    expires_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS analyses (
    id UUID PRIMARY KEY,
    entry_equipment_id UUID NOT NULL UNIQUE REFERENCES entry_equipments (id),
    observations TEXT NOT NULL DEFAULT '',
    total_price BIGINT NOT NULL,
    responsible_user TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS analysis_parts (
    analysis_id UUID NOT NULL REFERENCES analyses (id) ON DELETE CASCADE,
    part_id UUID NOT NULL REFERENCES parts (id),
    quantity INTEGER NOT NULL,
    unit_price BIGINT NOT NULL,
    PRIMARY KEY (analysis_id, part_id)
);
"#;

/// Create any missing table or index
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DomainError> {
    debug!("Executing CREATE TABLE statements if tables do not exist.");
    db.execute_unprepared(SCHEMA)
        .await
        .map_err(|e| DomainError::Database(format!("Failed to create tables: {}", e)))?;
    info!("Database tables ensured");
    Ok(())
}
