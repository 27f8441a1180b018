//! Sort specifications attached to pages and page requests
//!
//! A [`Sort`] is an ordered list of [`Order`]s, each naming a property and a
//! [`Direction`]. Two textual forms are understood:
//!
//! - the descriptive form, `name: ASC,age: DESC`, produced by `Display`
//! - the query form, `name,asc`, used for each `sort` query parameter
//!
//! # Example
//!
//! ```rust
//! use paged_resources::paging::{Direction, Order, Sort};
//!
//! let sort: Sort = "name: ASC,age: DESC".parse().unwrap();
//! assert_eq!(sort.orders().len(), 2);
//! assert_eq!(sort.orders()[1], Order::desc("age"));
//!
//! let order = Order::from_query_value("name,desc").unwrap();
//! assert_eq!(order.direction, Direction::Desc);
//! assert_eq!(order.to_query_value().unwrap(), "name,desc");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const UNSORTED: &str = "UNSORTED";

/// Sort direction
///
/// # Example
///
/// ```rust
/// use paged_resources::paging::Direction;
///
/// assert_eq!(Direction::Asc.as_query(), "asc");
/// assert_eq!(format!("{}", Direction::Desc), "DESC");
/// assert_eq!("Desc".parse::<Direction>().unwrap(), Direction::Desc);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Ascending (A-Z, 0-9)
    #[default]
    Asc,
    /// Descending (Z-A, 9-0)
    Desc,
}

impl Direction {
    /// Lowercase form used on the wire
    #[must_use]
    pub const fn as_query(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Whether this is [`Direction::Asc`]
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Asc)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if trimmed.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(Error::malformed_sort(format!("invalid direction '{trimmed}'")))
        }
    }
}

/// A single property/direction pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    /// Property to sort by
    pub property: String,
    /// Direction to sort in
    pub direction: Direction,
}

impl Order {
    /// Create a new order
    pub fn new(property: impl Into<String>, direction: Direction) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    /// Ascending order on `property`
    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Asc)
    }

    /// Descending order on `property`
    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Desc)
    }

    /// Parse the query form `property[,direction]`
    ///
    /// The direction defaults to ascending when omitted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSort`] when the property is empty or contains
    /// `:`, the direction is not `asc`/`desc`, or there are more than two
    /// tokens.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_resources::paging::{Direction, Order};
    ///
    /// assert_eq!(Order::from_query_value("name").unwrap(), Order::asc("name"));
    /// assert_eq!(Order::from_query_value("name,DESC").unwrap(), Order::desc("name"));
    /// assert!(Order::from_query_value("name,desc,extra").is_err());
    /// ```
    pub fn from_query_value(value: &str) -> Result<Self> {
        let mut tokens = value.split(',');
        let property = tokens.next().unwrap_or_default().trim();
        if property.is_empty() || property.contains(':') {
            return Err(Error::malformed_sort(value));
        }

        let direction = match tokens.next() {
            Some(direction) => direction
                .parse()
                .map_err(|_| Error::malformed_sort(value))?,
            None => Direction::Asc,
        };

        if tokens.next().is_some() {
            return Err(Error::malformed_sort(value));
        }

        Ok(Self::new(property, direction))
    }

    /// Render the query form `property,direction` with a lowercase direction
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSort`] when the property is empty or would
    /// not survive a round trip through the query form.
    pub fn to_query_value(&self) -> Result<String> {
        let property = self.property.trim();
        if property.is_empty() || property.contains([',', ':']) {
            return Err(Error::malformed_sort(self.to_string()));
        }

        Ok(format!("{},{}", property, self.direction.as_query()))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.direction)
    }
}

/// Parses the descriptive form `property: DIRECTION`
impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let [property, direction] = parts.as_slice() else {
            return Err(Error::malformed_sort(s));
        };

        let property = property.trim();
        if property.is_empty() {
            return Err(Error::malformed_sort(s));
        }

        let direction = direction.parse().map_err(|_| Error::malformed_sort(s))?;
        Ok(Self::new(property, direction))
    }
}

/// Ordered list of sort orders; empty means unsorted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort(Vec<Order>);

impl Sort {
    /// A sort with no orders
    #[must_use]
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort by the given orders, in priority order
    pub fn by(orders: impl IntoIterator<Item = Order>) -> Self {
        Self(orders.into_iter().collect())
    }

    /// Parse one query value per order (`sort=name,asc&sort=age,desc`)
    ///
    /// Empty values are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSort`] for the first value that fails to parse.
    pub fn from_query_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut orders = Vec::new();
        for value in values {
            let value = value.as_ref();
            if value.trim().is_empty() {
                continue;
            }
            orders.push(Order::from_query_value(value)?);
        }
        Ok(Self(orders))
    }

    /// Append an order
    #[must_use]
    pub fn and(mut self, order: Order) -> Self {
        self.0.push(order);
        self
    }

    /// Whether any order is present
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        !self.0.is_empty()
    }

    /// Whether no order is present
    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.0.is_empty()
    }

    /// The orders in priority order
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.0
    }

    /// Find the order for a property
    #[must_use]
    pub fn order_for(&self, property: &str) -> Option<&Order> {
        self.0.iter().find(|order| order.property == property)
    }

    /// Query values for each order, in order
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSort`] if any order cannot be rendered.
    pub fn to_query_values(&self) -> Result<Vec<String>> {
        self.0.iter().map(Order::to_query_value).collect()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{UNSORTED}");
        }
        for (i, order) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{order}")?;
        }
        Ok(())
    }
}

/// Parses the descriptive form produced by `Display`
impl FromStr for Sort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == UNSORTED {
            return Ok(Self::unsorted());
        }

        trimmed
            .split(',')
            .map(str::parse)
            .collect::<Result<Vec<Order>>>()
            .map(Self)
    }
}

impl From<Order> for Sort {
    fn from(order: Order) -> Self {
        Self(vec![order])
    }
}

impl FromIterator<Order> for Sort {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        Self::by(iter)
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
