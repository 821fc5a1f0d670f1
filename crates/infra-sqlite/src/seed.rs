// Reference data inserts
//
// Deals, employees and materials are owned by the CRM sync and the stock
// module. These helpers write them directly so the daemon can load demo
// data and tests can set up fixtures.

use crate::error::map_sqlx_error;
use moveops_core::domain::{DealId, EmployeeId, MaterialId};
use moveops_core::error::Result;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Default)]
pub struct NewDeal {
    /// Explicit primary key, or `None` to let SQLite assign one
    pub id: Option<DealId>,
    pub title: String,
    pub customer_name: Option<String>,
    pub origin_address: Option<String>,
    pub destination_address: Option<String>,
    pub move_date: Option<String>,
}

impl NewDeal {
    pub fn titled(id: DealId, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
}

impl NewEmployee {
    pub fn named(id: EmployeeId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewMaterial {
    pub id: Option<MaterialId>,
    pub name: String,
    pub unit: Option<String>,
    pub current_stock: i64,
    pub min_stock: i64,
}

impl NewMaterial {
    pub fn stocked(id: MaterialId, name: impl Into<String>, current_stock: i64) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            current_stock,
            ..Default::default()
        }
    }
}

pub async fn insert_deal(pool: &SqlitePool, deal: &NewDeal) -> Result<DealId> {
    let result = sqlx::query(
        r#"
        INSERT INTO deals (id, title, customer_name, origin_address, destination_address, move_date)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(deal.id)
    .bind(&deal.title)
    .bind(&deal.customer_name)
    .bind(&deal.origin_address)
    .bind(&deal.destination_address)
    .bind(&deal.move_date)
    .execute(pool)
    .await
    .map_err(map_sqlx_error)?;

    Ok(result.last_insert_rowid())
}

pub async fn insert_employee(pool: &SqlitePool, employee: &NewEmployee) -> Result<EmployeeId> {
    let result = sqlx::query(
        "INSERT INTO employees (id, first_name, last_name, role) VALUES (?, ?, ?, ?)",
    )
    .bind(employee.id)
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(&employee.role)
    .execute(pool)
    .await
    .map_err(map_sqlx_error)?;

    Ok(result.last_insert_rowid())
}

pub async fn insert_material(pool: &SqlitePool, material: &NewMaterial) -> Result<MaterialId> {
    let result = sqlx::query(
        r#"
        INSERT INTO materials (id, name, unit, current_stock, min_stock)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(material.id)
    .bind(&material.name)
    .bind(&material.unit)
    .bind(material.current_stock)
    .bind(material.min_stock)
    .execute(pool)
    .await
    .map_err(map_sqlx_error)?;

    Ok(result.last_insert_rowid())
}

/// Current stock of a material, `None` if it does not exist
pub async fn material_stock(pool: &SqlitePool, id: MaterialId) -> Result<Option<i64>> {
    sqlx::query_scalar("SELECT current_stock FROM materials WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(map_sqlx_error)
}

/// Whether the catalog tables hold any deal yet
pub async fn is_empty(pool: &SqlitePool) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM deals")
        .fetch_one(pool)
        .await
        .map_err(map_sqlx_error)?;
    Ok(count == 0)
}

/// Small fixed data set for local development
pub async fn load_demo_data(pool: &SqlitePool) -> Result<()> {
    insert_deal(
        pool,
        &NewDeal {
            id: Some(1),
            title: "Umzug Meier".to_string(),
            customer_name: Some("Familie Meier".to_string()),
            origin_address: Some("Hauptstrasse 1, Berlin".to_string()),
            destination_address: Some("Seeweg 12, Potsdam".to_string()),
            move_date: Some("2026-11-02".to_string()),
        },
    )
    .await?;
    insert_deal(
        pool,
        &NewDeal {
            id: Some(2),
            title: "Buero Schulz".to_string(),
            customer_name: Some("Schulz GmbH".to_string()),
            origin_address: Some("Industriering 4, Berlin".to_string()),
            destination_address: Some("Am Markt 7, Berlin".to_string()),
            move_date: Some("2026-11-05".to_string()),
        },
    )
    .await?;

    for (id, first, last) in [(10, "Anna", "Berg"), (11, "Jonas", "Krueger"), (12, "Mia", "Wolf")] {
        insert_employee(pool, &NewEmployee::named(id, first, last)).await?;
    }

    for (id, name, unit, stock) in [
        (3, "Umzugskarton", "Stueck", 100),
        (4, "Packdecke", "Stueck", 40),
        (5, "Klebeband", "Rolle", 60),
    ] {
        insert_material(
            pool,
            &NewMaterial {
                unit: Some(unit.to_string()),
                min_stock: 10,
                ..NewMaterial::stocked(id, name, stock)
            },
        )
        .await?;
    }

    tracing::info!("Demo data loaded");
    Ok(())
}
