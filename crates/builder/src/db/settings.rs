//! Settings-row queries.
//!
//! Plain runtime-checked queries; the column list here must stay in step
//! with `crates/builder/migrations/0001_store_settings.sql`.

use sqlx::PgPool;

use vitrine_core::{SettingsRow, TenantId};

const ROW_COLUMNS: &str = "tenant_id, slug, store_name, currency, logo_url, banner_url, \
     template, hero_heading, hero_subtitle, hero_button_text, accent_color, hero_media, \
     gallery_images, settings, template_settings, template_settings_by_template, \
     layout_by_template";

/// Fetch a tenant's settings row.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn fetch_settings_row(
    pool: &PgPool,
    tenant_id: TenantId,
) -> Result<Option<SettingsRow>, sqlx::Error> {
    let query = format!("SELECT {ROW_COLUMNS} FROM store_settings WHERE tenant_id = $1");
    sqlx::query_as::<_, SettingsRow>(&query)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

/// Insert or fully replace a tenant's settings row.
///
/// The whole row is written in one statement, so an update is
/// all-or-nothing: either every computed column and JSON blob lands, or
/// none do.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn upsert_settings_row(pool: &PgPool, row: &SettingsRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO store_settings (
            tenant_id, slug, store_name, currency, logo_url, banner_url,
            template, hero_heading, hero_subtitle, hero_button_text,
            accent_color, hero_media, gallery_images, settings,
            template_settings, template_settings_by_template, layout_by_template
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        ON CONFLICT (tenant_id) DO UPDATE SET
            slug = EXCLUDED.slug,
            store_name = EXCLUDED.store_name,
            currency = EXCLUDED.currency,
            logo_url = EXCLUDED.logo_url,
            banner_url = EXCLUDED.banner_url,
            template = EXCLUDED.template,
            hero_heading = EXCLUDED.hero_heading,
            hero_subtitle = EXCLUDED.hero_subtitle,
            hero_button_text = EXCLUDED.hero_button_text,
            accent_color = EXCLUDED.accent_color,
            hero_media = EXCLUDED.hero_media,
            gallery_images = EXCLUDED.gallery_images,
            settings = EXCLUDED.settings,
            template_settings = EXCLUDED.template_settings,
            template_settings_by_template = EXCLUDED.template_settings_by_template,
            layout_by_template = EXCLUDED.layout_by_template,
            updated_at = NOW()
        ",
    )
    .bind(row.tenant_id)
    .bind(&row.slug)
    .bind(&row.store_name)
    .bind(&row.currency)
    .bind(&row.logo_url)
    .bind(&row.banner_url)
    .bind(&row.template)
    .bind(&row.hero_heading)
    .bind(&row.hero_subtitle)
    .bind(&row.hero_button_text)
    .bind(&row.accent_color)
    .bind(&row.hero_media)
    .bind(&row.gallery_images)
    .bind(&row.settings)
    .bind(&row.template_settings)
    .bind(&row.template_settings_by_template)
    .bind(&row.layout_by_template)
    .execute(pool)
    .await?;

    Ok(())
}
