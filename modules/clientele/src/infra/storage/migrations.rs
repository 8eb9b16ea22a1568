use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240830_000002_create_clientele::Migration)]
    }

    // Own bookkeeping table, so this migrator can share a database with the
    // other modules' migrators.
    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("clientele_migrations").into_iden()
    }
}

mod m20240830_000002_create_clientele {
    use sea_orm_migration::prelude::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[derive(DeriveIden)]
    enum Roles {
        Table,
        Id,
        Name,
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        Nom,
        Prenom,
        Login,
        Password,
        RoleId,
        Active,
        Photo,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Clients {
        Table,
        Id,
        Surname,
        Adresse,
        Telephone,
        Email,
        UserId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum AccessTokens {
        Table,
        Id,
        UserId,
        TokenHash,
        CreatedAt,
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Roles::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Roles::Id)
                                .big_integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Roles::Name).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Users::Nom).string().not_null())
                        .col(ColumnDef::new(Users::Prenom).string().not_null())
                        .col(
                            ColumnDef::new(Users::Login)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::Password).string().not_null())
                        .col(ColumnDef::new(Users::RoleId).big_integer().not_null())
                        .col(ColumnDef::new(Users::Active).string().not_null())
                        .col(ColumnDef::new(Users::Photo).string())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Users::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .from(Users::Table, Users::RoleId)
                                .to(Roles::Table, Roles::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Clients::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Clients::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Clients::Surname).string().not_null())
                        .col(ColumnDef::new(Clients::Adresse).string().not_null())
                        .col(
                            ColumnDef::new(Clients::Telephone)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Clients::Email).string())
                        .col(ColumnDef::new(Clients::UserId).big_integer())
                        .col(
                            ColumnDef::new(Clients::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Clients::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .from(Clients::Table, Clients::UserId)
                                .to(Users::Table, Users::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(AccessTokens::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AccessTokens::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(AccessTokens::UserId).big_integer().not_null())
                        .col(
                            ColumnDef::new(AccessTokens::TokenHash)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(AccessTokens::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .from(AccessTokens::Table, AccessTokens::UserId)
                                .to(Users::Table, Users::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // static reference data
            let seed = Query::insert()
                .into_table(Roles::Table)
                .columns([Roles::Id, Roles::Name])
                .values_panic([1i64.into(), "ADMIN".into()])
                .values_panic([2i64.into(), "BOUTIQUIER".into()])
                .to_owned();
            manager.exec_stmt(seed).await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AccessTokens::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Clients::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Roles::Table).to_owned())
                .await
        }
    }
}
