//! FetchXML condition operators

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::UnsupportedError;

/// A FetchXML condition operator.
///
/// Parses both the hyphenated token used in FetchXML documents
/// (`not-begin-with`, `last-x-days`) and the compact token (`notbeginwith`,
/// `lastxdays`). Displays as the hyphenated token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConditionOperator {
    Eq,
    Neq,
    Ne,
    Gt,
    Ge,
    Le,
    Lt,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
    Null,
    NotNull,
    Yesterday,
    Today,
    Tomorrow,
    LastSevenDays,
    NextSevenDays,
    LastWeek,
    ThisWeek,
    NextWeek,
    LastMonth,
    ThisMonth,
    NextMonth,
    On,
    OnOrBefore,
    OnOrAfter,
    LastYear,
    ThisYear,
    NextYear,
    LastXHours,
    NextXHours,
    LastXDays,
    NextXDays,
    LastXWeeks,
    NextXWeeks,
    LastXMonths,
    NextXMonths,
    OlderThanXMonths,
    OlderThanXYears,
    OlderThanXWeeks,
    OlderThanXDays,
    OlderThanXHours,
    OlderThanXMinutes,
    LastXYears,
    NextXYears,
    EqUserId,
    NeUserId,
    EqUserTeams,
    EqUserOrUserTeams,
    EqUserOrUserHierarchy,
    EqUserOrUserHierarchyAndTeams,
    EqBusinessId,
    NeBusinessId,
    EqUserLanguage,
    ThisFiscalYear,
    ThisFiscalPeriod,
    NextFiscalYear,
    NextFiscalPeriod,
    LastFiscalYear,
    LastFiscalPeriod,
    LastXFiscalYears,
    LastXFiscalPeriods,
    NextXFiscalYears,
    NextXFiscalPeriods,
    InFiscalYear,
    InFiscalPeriod,
    InFiscalPeriodAndYear,
    InOrBeforeFiscalPeriodAndYear,
    InOrAfterFiscalPeriodAndYear,
    BeginsWith,
    NotBeginWith,
    EndsWith,
    NotEndWith,
    Under,
    EqOrUnder,
    NotUnder,
    Above,
    EqOrAbove,
    ContainValues,
    NotContainValues,
}

impl ConditionOperator {
    /// Every operator, in FetchXML schema order.
    pub const ALL: &'static [ConditionOperator] = &[
        Self::Eq,
        Self::Neq,
        Self::Ne,
        Self::Gt,
        Self::Ge,
        Self::Le,
        Self::Lt,
        Self::Like,
        Self::NotLike,
        Self::In,
        Self::NotIn,
        Self::Between,
        Self::NotBetween,
        Self::Null,
        Self::NotNull,
        Self::Yesterday,
        Self::Today,
        Self::Tomorrow,
        Self::LastSevenDays,
        Self::NextSevenDays,
        Self::LastWeek,
        Self::ThisWeek,
        Self::NextWeek,
        Self::LastMonth,
        Self::ThisMonth,
        Self::NextMonth,
        Self::On,
        Self::OnOrBefore,
        Self::OnOrAfter,
        Self::LastYear,
        Self::ThisYear,
        Self::NextYear,
        Self::LastXHours,
        Self::NextXHours,
        Self::LastXDays,
        Self::NextXDays,
        Self::LastXWeeks,
        Self::NextXWeeks,
        Self::LastXMonths,
        Self::NextXMonths,
        Self::OlderThanXMonths,
        Self::OlderThanXYears,
        Self::OlderThanXWeeks,
        Self::OlderThanXDays,
        Self::OlderThanXHours,
        Self::OlderThanXMinutes,
        Self::LastXYears,
        Self::NextXYears,
        Self::EqUserId,
        Self::NeUserId,
        Self::EqUserTeams,
        Self::EqUserOrUserTeams,
        Self::EqUserOrUserHierarchy,
        Self::EqUserOrUserHierarchyAndTeams,
        Self::EqBusinessId,
        Self::NeBusinessId,
        Self::EqUserLanguage,
        Self::ThisFiscalYear,
        Self::ThisFiscalPeriod,
        Self::NextFiscalYear,
        Self::NextFiscalPeriod,
        Self::LastFiscalYear,
        Self::LastFiscalPeriod,
        Self::LastXFiscalYears,
        Self::LastXFiscalPeriods,
        Self::NextXFiscalYears,
        Self::NextXFiscalPeriods,
        Self::InFiscalYear,
        Self::InFiscalPeriod,
        Self::InFiscalPeriodAndYear,
        Self::InOrBeforeFiscalPeriodAndYear,
        Self::InOrAfterFiscalPeriodAndYear,
        Self::BeginsWith,
        Self::NotBeginWith,
        Self::EndsWith,
        Self::NotEndWith,
        Self::Under,
        Self::EqOrUnder,
        Self::NotUnder,
        Self::Above,
        Self::EqOrAbove,
        Self::ContainValues,
        Self::NotContainValues,
    ];

    /// Returns the FetchXML token for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Le => "le",
            Self::Lt => "lt",
            Self::Like => "like",
            Self::NotLike => "not-like",
            Self::In => "in",
            Self::NotIn => "not-in",
            Self::Between => "between",
            Self::NotBetween => "not-between",
            Self::Null => "null",
            Self::NotNull => "not-null",
            Self::Yesterday => "yesterday",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::LastSevenDays => "last-seven-days",
            Self::NextSevenDays => "next-seven-days",
            Self::LastWeek => "last-week",
            Self::ThisWeek => "this-week",
            Self::NextWeek => "next-week",
            Self::LastMonth => "last-month",
            Self::ThisMonth => "this-month",
            Self::NextMonth => "next-month",
            Self::On => "on",
            Self::OnOrBefore => "on-or-before",
            Self::OnOrAfter => "on-or-after",
            Self::LastYear => "last-year",
            Self::ThisYear => "this-year",
            Self::NextYear => "next-year",
            Self::LastXHours => "last-x-hours",
            Self::NextXHours => "next-x-hours",
            Self::LastXDays => "last-x-days",
            Self::NextXDays => "next-x-days",
            Self::LastXWeeks => "last-x-weeks",
            Self::NextXWeeks => "next-x-weeks",
            Self::LastXMonths => "last-x-months",
            Self::NextXMonths => "next-x-months",
            Self::OlderThanXMonths => "olderthan-x-months",
            Self::OlderThanXYears => "olderthan-x-years",
            Self::OlderThanXWeeks => "olderthan-x-weeks",
            Self::OlderThanXDays => "olderthan-x-days",
            Self::OlderThanXHours => "olderthan-x-hours",
            Self::OlderThanXMinutes => "olderthan-x-minutes",
            Self::LastXYears => "last-x-years",
            Self::NextXYears => "next-x-years",
            Self::EqUserId => "eq-userid",
            Self::NeUserId => "ne-userid",
            Self::EqUserTeams => "eq-userteams",
            Self::EqUserOrUserTeams => "eq-useroruserteams",
            Self::EqUserOrUserHierarchy => "eq-useroruserhierarchy",
            Self::EqUserOrUserHierarchyAndTeams => "eq-useroruserhierarchyandteams",
            Self::EqBusinessId => "eq-businessid",
            Self::NeBusinessId => "ne-businessid",
            Self::EqUserLanguage => "eq-userlanguage",
            Self::ThisFiscalYear => "this-fiscal-year",
            Self::ThisFiscalPeriod => "this-fiscal-period",
            Self::NextFiscalYear => "next-fiscal-year",
            Self::NextFiscalPeriod => "next-fiscal-period",
            Self::LastFiscalYear => "last-fiscal-year",
            Self::LastFiscalPeriod => "last-fiscal-period",
            Self::LastXFiscalYears => "last-x-fiscal-years",
            Self::LastXFiscalPeriods => "last-x-fiscal-periods",
            Self::NextXFiscalYears => "next-x-fiscal-years",
            Self::NextXFiscalPeriods => "next-x-fiscal-periods",
            Self::InFiscalYear => "in-fiscal-year",
            Self::InFiscalPeriod => "in-fiscal-period",
            Self::InFiscalPeriodAndYear => "in-fiscal-period-and-year",
            Self::InOrBeforeFiscalPeriodAndYear => "in-or-before-fiscal-period-and-year",
            Self::InOrAfterFiscalPeriodAndYear => "in-or-after-fiscal-period-and-year",
            Self::BeginsWith => "begins-with",
            Self::NotBeginWith => "not-begin-with",
            Self::EndsWith => "ends-with",
            Self::NotEndWith => "not-end-with",
            Self::Under => "under",
            Self::EqOrUnder => "eq-or-under",
            Self::NotUnder => "not-under",
            Self::Above => "above",
            Self::EqOrAbove => "eq-or-above",
            Self::ContainValues => "contain-values",
            Self::NotContainValues => "not-contain-values",
        }
    }

    /// Returns the logical complement used when negating a filter, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use fetchxml_lib::query::fetchxml::ConditionOperator;
    ///
    /// assert_eq!(ConditionOperator::Lt.inverse(), Some(ConditionOperator::Ge));
    /// assert_eq!(ConditionOperator::Today.inverse(), None);
    /// ```
    pub fn inverse(self) -> Option<Self> {
        let inverse = match self {
            Self::Eq => Self::Ne,
            Self::Ne => Self::Eq,
            Self::Lt => Self::Ge,
            Self::Le => Self::Gt,
            Self::Gt => Self::Le,
            Self::Ge => Self::Lt,
            Self::Null => Self::NotNull,
            Self::NotNull => Self::Null,
            Self::In => Self::NotIn,
            Self::NotIn => Self::In,
            Self::BeginsWith => Self::NotBeginWith,
            Self::NotBeginWith => Self::BeginsWith,
            Self::EndsWith => Self::NotEndWith,
            Self::NotEndWith => Self::EndsWith,
            Self::Between => Self::NotBetween,
            Self::NotBetween => Self::Between,
            Self::ContainValues => Self::NotContainValues,
            Self::NotContainValues => Self::ContainValues,
            Self::Like => Self::NotLike,
            Self::NotLike => Self::Like,
            Self::Under => Self::NotUnder,
            Self::NotUnder => Self::Under,
            _ => return None,
        };
        Some(inverse)
    }
}

/// Compares a token against an operator name, ignoring hyphens.
fn matches_compact(token: &str, name: &str) -> bool {
    token
        .chars()
        .filter(|c| *c != '-')
        .eq(name.chars().filter(|c| *c != '-'))
}

impl FromStr for ConditionOperator {
    type Err = UnsupportedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| matches_compact(s, op.as_str()))
            .ok_or_else(|| UnsupportedError::Operator {
                operator: s.to_string(),
            })
    }
}

impl TryFrom<String> for ConditionOperator {
    type Error = UnsupportedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConditionOperator> for String {
    fn from(op: ConditionOperator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
