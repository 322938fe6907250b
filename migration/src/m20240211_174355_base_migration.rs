use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Enum types used by the tables below
        db.execute_unprepared(
            r#"
            CREATE TYPE parea.event_status AS ENUM ('open', 'closed');
            CREATE TYPE parea.paper_status AS ENUM ('under_review', 'awaiting_decision', 'accepted', 'rejected');
            CREATE TYPE parea.review_decision AS ENUM ('not_sure', 'accept', 'reject');
            CREATE TYPE parea.sex AS ENUM ('not_specified', 'female', 'male');
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE parea.users (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                email VARCHAR(255) NOT NULL UNIQUE,
                username VARCHAR(255) NOT NULL UNIQUE,
                password VARCHAR(255) NOT NULL,
                is_staff BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE TABLE parea.profiles (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                user_id UUID NOT NULL UNIQUE REFERENCES parea.users(id) ON DELETE CASCADE,
                first_name VARCHAR(255) NOT NULL,
                last_name VARCHAR(255) NOT NULL,
                sex parea.sex NOT NULL DEFAULT 'not_specified',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE TABLE parea.events (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(255) NOT NULL UNIQUE,
                slug VARCHAR(255) NOT NULL UNIQUE,
                acronym VARCHAR(63) NOT NULL UNIQUE,
                status parea.event_status NOT NULL DEFAULT 'open',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE TABLE parea.papers (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                event_id UUID NOT NULL REFERENCES parea.events(id) ON DELETE CASCADE,
                title VARCHAR(255) NOT NULL,
                slug VARCHAR(255) NOT NULL,
                abstract_text TEXT NOT NULL,
                file_path VARCHAR(1024) NOT NULL,
                status parea.paper_status NOT NULL DEFAULT 'under_review',
                locked BOOLEAN NOT NULL DEFAULT FALSE,
                submitted_by UUID NOT NULL REFERENCES parea.users(id),
                decided_by UUID REFERENCES parea.users(id),
                decided_at TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (event_id, slug)
            );

            CREATE TABLE parea.reviews (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                paper_id UUID NOT NULL REFERENCES parea.papers(id) ON DELETE CASCADE,
                event_id UUID NOT NULL REFERENCES parea.events(id) ON DELETE CASCADE,
                reviewer_id UUID NOT NULL REFERENCES parea.users(id),
                decision parea.review_decision NOT NULL DEFAULT 'not_sure',
                rate SMALLINT NOT NULL DEFAULT 0,
                comment TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (paper_id, reviewer_id)
            );

            CREATE TABLE parea.chairs (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                event_id UUID NOT NULL REFERENCES parea.events(id) ON DELETE CASCADE,
                user_id UUID NOT NULL REFERENCES parea.users(id) ON DELETE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (event_id, user_id)
            );

            CREATE TABLE parea.pc_members (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                event_id UUID NOT NULL REFERENCES parea.events(id) ON DELETE CASCADE,
                user_id UUID NOT NULL REFERENCES parea.users(id) ON DELETE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (event_id, user_id)
            );

            CREATE TABLE parea.authors (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                paper_id UUID NOT NULL REFERENCES parea.papers(id) ON DELETE CASCADE,
                user_id UUID NOT NULL REFERENCES parea.users(id) ON DELETE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (paper_id, user_id)
            );

            CREATE TABLE parea.reviewers (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                paper_id UUID NOT NULL REFERENCES parea.papers(id) ON DELETE CASCADE,
                user_id UUID NOT NULL REFERENCES parea.users(id) ON DELETE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (paper_id, user_id)
            );

            CREATE TABLE parea.annotations (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                schema_version VARCHAR(31) NOT NULL DEFAULT 'v1.0',
                text TEXT NOT NULL,
                quote TEXT NOT NULL,
                uri VARCHAR(1024) NOT NULL,
                user_id UUID NOT NULL REFERENCES parea.users(id) ON DELETE CASCADE,
                user_username VARCHAR(255) NOT NULL,
                consumer VARCHAR(255) NOT NULL DEFAULT 'parea',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE TABLE parea.ranges (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                annotation_id UUID NOT NULL REFERENCES parea.annotations(id) ON DELETE CASCADE,
                "start" VARCHAR(1024) NOT NULL,
                "end" VARCHAR(1024) NOT NULL,
                start_offset INTEGER NOT NULL,
                end_offset INTEGER NOT NULL
            );
            "#,
        )
        .await?;

        // Lookup indexes for the hot read paths
        db.execute_unprepared(
            r#"
            CREATE INDEX papers_event_id_idx ON parea.papers (event_id);
            CREATE INDEX reviews_paper_id_idx ON parea.reviews (paper_id);
            CREATE INDEX reviews_event_id_idx ON parea.reviews (event_id);
            CREATE INDEX annotations_uri_idx ON parea.annotations (uri);
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            DROP TABLE IF EXISTS parea.ranges;
            DROP TABLE IF EXISTS parea.annotations;
            DROP TABLE IF EXISTS parea.reviewers;
            DROP TABLE IF EXISTS parea.authors;
            DROP TABLE IF EXISTS parea.pc_members;
            DROP TABLE IF EXISTS parea.chairs;
            DROP TABLE IF EXISTS parea.reviews;
            DROP TABLE IF EXISTS parea.papers;
            DROP TABLE IF EXISTS parea.events;
            DROP TABLE IF EXISTS parea.profiles;
            DROP TABLE IF EXISTS parea.users;

            DROP TYPE IF EXISTS parea.sex;
            DROP TYPE IF EXISTS parea.review_decision;
            DROP TYPE IF EXISTS parea.paper_status;
            DROP TYPE IF EXISTS parea.event_status;
            "#,
        )
        .await?;

        Ok(())
    }
}
