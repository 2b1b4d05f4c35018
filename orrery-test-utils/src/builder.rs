//! Declarative test builder.
//!
//! The builder queues tables and seed users, then executes everything in `build()`.

use entity::sea_orm_active_enums::Role;
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    draft_index: bool,
    users: Vec<(String, Role)>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            draft_index: false,
            users: Vec::new(),
        }
    }

    /// Add every table of the orrery schema, in foreign key order.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_core_tables(self) -> Self {
        self.with_table(entity::prelude::AppUser)
            .with_table(entity::prelude::Planet)
            .with_table(entity::prelude::PlanetSystem)
            .with_table(entity::prelude::TemperatureRequest)
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    ///
    /// # Example
    ///
    /// ```no_run
    /// use orrery_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), orrery_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(AppUser)
    ///     .with_table(Planet)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Add the migration's one-draft-per-user partial unique index.
    ///
    /// Entity-generated tables carry no such index. Requires the `PlanetSystem` table.
    pub fn with_draft_index(mut self) -> Self {
        self.draft_index = true;
        self
    }

    /// Insert a user with the provided login and role during `build()`.
    ///
    /// Requires the `AppUser` table.
    pub fn with_user(mut self, login: impl Into<String>, role: Role) -> Self {
        self.users.push((login.into(), role));
        self
    }

    /// Build the test context by creating all configured tables and fixtures.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        setup.with_tables(self.tables).await?;

        if self.draft_index {
            setup
                .db
                .execute_unprepared(&migration::one_draft_per_user_index())
                .await?;
        }

        for (login, role) in self.users {
            setup.user().insert_user(&login, role).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
