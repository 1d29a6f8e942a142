use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email VARCHAR(255) NOT NULL UNIQUE,
            first_name VARCHAR(255) NULL,
            last_name VARCHAR(255) NULL,
            phone_number VARCHAR(64) NULL,
            address TEXT NULL,
            password_hash VARCHAR(255) NOT NULL,
            prospect BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            description TEXT NOT NULL,
            price_cents BIGINT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create time_slots table. The appointment back-reference is nullable and
    // only set while the slot is claimed.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            booked BOOLEAN NOT NULL DEFAULT FALSE,
            appointment_id UUID NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. Start/end are denormalized from the slot at
    // booking time.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL REFERENCES users(id),
            service_id UUID NULL REFERENCES services(id),
            time_slot_id UUID NOT NULL REFERENCES time_slots(id),
            status VARCHAR(32) NOT NULL DEFAULT 'Pending',
            notes TEXT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes. One statement per query: prepared statements cannot
    // carry multiple commands.
    for index in [
        "CREATE INDEX IF NOT EXISTS idx_time_slots_start_time ON time_slots(start_time)",
        "CREATE INDEX IF NOT EXISTS idx_time_slots_booked ON time_slots(booked)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_user_id ON appointments(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_time_slot_id ON appointments(time_slot_id)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_status ON appointments(status)",
        "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
    ] {
        sqlx::query(index).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
