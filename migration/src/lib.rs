pub use sea_orm_migration::prelude::*;

mod m20250820_000001_users;
mod m20250820_000002_user_roles;
mod m20250820_000003_categories;
mod m20250820_000004_events;
mod m20250820_000005_attendances;
mod m20250820_000006_comments;
mod m20250820_000007_ratings;
mod m20250820_000008_reports;
mod m20250820_000009_memberships;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250820_000001_users::Migration),
            Box::new(m20250820_000002_user_roles::Migration),
            Box::new(m20250820_000003_categories::Migration),
            Box::new(m20250820_000004_events::Migration),
            Box::new(m20250820_000005_attendances::Migration),
            Box::new(m20250820_000006_comments::Migration),
            Box::new(m20250820_000007_ratings::Migration),
            Box::new(m20250820_000008_reports::Migration),
            Box::new(m20250820_000009_memberships::Migration),
        ]
    }
}
