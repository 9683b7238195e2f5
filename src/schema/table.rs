/// Builds a [`Column`] with every optional attribute off, then applies the
/// given `field = value` overrides.
#[macro_export]
macro_rules! warehouse_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            // Only mutated when overrides are given.
            #[allow(unused_mut)]
            let mut column = Column {
                name: $name,
                sql_type: $sql_type,
                non_null: false,
                is_primary_key: false,
                is_identity: false,
                is_dist_key: false,
                is_sort_key: false,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

/// SQL flavour a statement is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Redshift,
    Sqlite,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SqlType {
    Varchar(u16),
    Char(u16),
    SmallInt,
    Integer,
    BigInt,
    Decimal(u8, u8),
    Float,
    Timestamp,
}

impl SqlType {
    fn render(&self) -> String {
        match self {
            SqlType::Varchar(len) => format!("VARCHAR({})", len),
            SqlType::Char(len) => format!("CHAR({})", len),
            SqlType::SmallInt => "SMALLINT".to_string(),
            SqlType::Integer => "INTEGER".to_string(),
            SqlType::BigInt => "BIGINT".to_string(),
            SqlType::Decimal(precision, scale) => format!("DECIMAL({},{})", precision, scale),
            SqlType::Float => "FLOAT".to_string(),
            SqlType::Timestamp => "TIMESTAMP".to_string(),
        }
    }
}

/// Redshift table distribution style.
#[derive(Debug, PartialEq, Eq)]
pub enum DistStyle {
    Key,
    All,
}

#[derive(Debug)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static SqlType,
    pub non_null: bool,
    /// Informational only, the warehouse never enforces it.
    pub is_primary_key: bool,
    /// Engine-generated surrogate key starting at 0.
    pub is_identity: bool,
    pub is_dist_key: bool,
    pub is_sort_key: bool,
}

#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub dist_style: Option<DistStyle>,
}

impl Table {
    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {};", self.name)
    }

    pub fn create_sql(&self, dialect: Dialect) -> String {
        let mut create_sql = format!("\nCREATE TABLE {}\n(\n", self.name);
        let width = self
            .columns
            .iter()
            .map(|column| column.name.len())
            .max()
            .unwrap_or(0);

        for (column_index, column) in self.columns.iter().enumerate() {
            if column_index > 0 {
                create_sql.push_str(",\n");
            }
            create_sql.push_str(&format!(
                "    {:<width$} {}",
                column.name,
                column.render_constraints(dialect),
                width = width + 3
            ));
        }
        create_sql.push_str("\n)");

        if dialect == Dialect::Redshift {
            match self.dist_style {
                Some(DistStyle::Key) => create_sql.push_str(" DISTSTYLE KEY"),
                Some(DistStyle::All) => create_sql.push_str(" DISTSTYLE ALL"),
                None => {}
            }
        }
        create_sql.push_str(";\n");
        create_sql
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }
}

impl Column {
    fn render_constraints(&self, dialect: Dialect) -> String {
        let mut sql = self.sql_type.render();
        match dialect {
            Dialect::Redshift => {
                if self.is_identity {
                    sql.push_str(" IDENTITY(0,1)");
                }
                if self.non_null {
                    sql.push_str(" NOT NULL");
                }
                if self.is_primary_key {
                    sql.push_str(" PRIMARY KEY");
                }
                if self.is_dist_key {
                    sql.push_str(" DISTKEY");
                }
                if self.is_sort_key {
                    sql.push_str(" SORTKEY");
                }
            }
            Dialect::Sqlite => {
                // Only the surrogate key gets a real constraint, any other
                // declared key stays unenforced as it is on Redshift.
                if self.is_identity {
                    sql.push_str(" PRIMARY KEY AUTOINCREMENT");
                }
                if self.non_null {
                    sql.push_str(" NOT NULL");
                }
            }
        }
        sql
    }
}
