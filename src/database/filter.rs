use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid filter field: {0}")]
    InvalidFilterField(String),

    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),
}

/// The fixed set of column tokens accepted in dynamic filter and sort
/// clauses. Anything outside this set is rejected before SQL is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreField {
    Id,
    Name,
    Address,
    City,
    Country,
    PostalCode,
    Phone,
    Email,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

impl StoreField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "address" => Some(Self::Address),
            "city" => Some(Self::City),
            "country" => Some(Self::Country),
            "postal_code" => Some(Self::PostalCode),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "is_active" => Some(Self::IsActive),
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Address => "address",
            Self::City => "city",
            Self::Country => "country",
            Self::PostalCode => "postal_code",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::IsActive => "is_active",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything that is not explicitly "desc" sorts ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Validated exact-match filters and sort keys for the stores table.
/// Construction is the whitelist boundary: an unknown field name fails here,
/// before any query executes.
#[derive(Debug, Clone, Default)]
pub struct StoreFilter {
    filters: Vec<(StoreField, Value)>,
    sort: Vec<(StoreField, SortDirection)>,
}

impl StoreFilter {
    pub fn new(
        filters: &[(String, Value)],
        sort: &[(String, SortDirection)],
    ) -> Result<Self, FilterError> {
        let mut checked_filters = Vec::with_capacity(filters.len());
        for (name, value) in filters {
            let field = StoreField::parse(name)
                .ok_or_else(|| FilterError::InvalidFilterField(name.clone()))?;
            checked_filters.push((field, value.clone()));
        }

        let mut checked_sort = Vec::with_capacity(sort.len());
        for (name, direction) in sort {
            let field =
                StoreField::parse(name).ok_or_else(|| FilterError::InvalidSortField(name.clone()))?;
            checked_sort.push((field, *direction));
        }

        Ok(Self { filters: checked_filters, sort: checked_sort })
    }

    pub fn filters(&self) -> &[(StoreField, Value)] {
        &self.filters
    }

    pub fn sort(&self) -> &[(StoreField, SortDirection)] {
        &self.sort
    }

    /// Build the SELECT statement with `$n` placeholders for every filter
    /// value, in filter order. Sort keys compose in the order given.
    pub fn to_sql(&self, table: &str) -> (String, Vec<&Value>) {
        let mut sql = format!("SELECT * FROM {}", table);
        let mut params = Vec::with_capacity(self.filters.len());

        if !self.filters.is_empty() {
            let conditions: Vec<String> = self
                .filters
                .iter()
                .enumerate()
                .map(|(i, (field, _))| format!("{} = ${}", field.column(), i + 1))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
            params.extend(self.filters.iter().map(|(_, value)| value));
        }

        if !self.sort.is_empty() {
            let order: Vec<String> = self
                .sort
                .iter()
                .map(|(field, direction)| format!("{} {}", field.column(), direction.to_sql()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        (sql, params)
    }
}
