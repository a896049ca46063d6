pub mod dialect;
pub mod sql;

mod counter;

pub use counter::Counter;
pub use sql::{Expression, ExpressionContext};
pub use dialect::{Dialect, MssqlDialect, PostgresDialect};
pub use sql::column::{Column, PhysicalColumn};
pub use sql::delete::Delete;
pub use sql::insert::Insert;
pub use sql::limit::Limit;
pub use sql::offset::Offset;
pub use sql::order::{OrderBy, Ordering};
pub use sql::physical_table::{DatabaseObject, PhysicalTable};
pub use sql::predicate::{CaseSensitivity, Predicate, StringMatchKind};
pub use sql::select::{AliasedTable, Join, JoinKind, JoinTarget, Select};
pub use sql::sql_operation::{build, SqlOperation, SqlQuery};
pub use sql::update::Update;
pub use sql::upsert::Upsert;
pub use sql::value::{ColumnValue, SystemType};
