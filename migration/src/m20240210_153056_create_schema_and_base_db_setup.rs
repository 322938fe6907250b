use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the platform's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS parea;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO parea, public;")
            .await?;

        // Create the base DB user that will execute all platform queries
        manager
            .get_connection()
            .execute_unprepared(r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE parea TO parea;
                    GRANT ALL ON SCHEMA parea TO parea;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA parea GRANT ALL ON TABLES TO parea;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA parea GRANT ALL ON SEQUENCES TO parea;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA parea GRANT ALL ON FUNCTIONS TO parea;
                END $$;
            "#)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Revoke default privileges first
        manager
            .get_connection()
            .execute_unprepared(r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA parea REVOKE ALL ON FUNCTIONS FROM parea;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA parea REVOKE ALL ON SEQUENCES FROM parea;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA parea REVOKE ALL ON TABLES FROM parea;
                    REVOKE ALL ON SCHEMA parea FROM parea;
                    REVOKE ALL PRIVILEGES ON DATABASE parea FROM parea;
                END $$;
            "#)
            .await?;

        // Drop the schema (CASCADE will remove all objects in it)
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS parea CASCADE;")
            .await?;

        Ok(())
    }
}
