//! How each condition operator is written in OData.

use crate::query::fetchxml::ConditionOperator;
use crate::query::odata::ValueType;

/// The number of parameters a query function takes besides the property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    /// `Fn(PropertyName='a')`
    None,
    /// `Fn(PropertyName='a',PropertyValue=v)`
    Single,
    /// `Fn(PropertyName='a',Property1=v1,Property2=v2)`
    Pair,
    /// `Fn(PropertyName='a',PropertyValues=[v1,v2])`
    Many,
}

/// The rendering strategy for an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperatorKind {
    /// A binary comparison, `prop op value`.
    Compare(&'static str),
    /// `prop eq null` or `prop ne null`.
    Null(&'static str),
    /// A `like` pattern mapped to a string function or equality.
    Like { negated: bool },
    /// `startswith` or `endswith`, optionally negated.
    StringFunction { function: &'static str, negated: bool },
    /// A `Microsoft.Dynamics.CRM` query function.
    Function {
        name: &'static str,
        arity: Arity,
        /// Literal type of the parameters, independent of the attribute type.
        parameter: ValueType,
    },
}

const fn function(name: &'static str) -> OperatorKind {
    OperatorKind::Function {
        name,
        arity: Arity::None,
        parameter: ValueType::String,
    }
}

const fn function_of(name: &'static str, arity: Arity, parameter: ValueType) -> OperatorKind {
    OperatorKind::Function { name, arity, parameter }
}

/// Classifies an operator.
pub(crate) fn classify(operator: ConditionOperator) -> OperatorKind {
    use Arity::*;
    use ConditionOperator as Op;
    use OperatorKind::*;

    match operator {
        Op::Eq => Compare("eq"),
        Op::Neq | Op::Ne => Compare("ne"),
        Op::Gt => Compare("gt"),
        Op::Ge => Compare("ge"),
        Op::Lt => Compare("lt"),
        Op::Le => Compare("le"),
        Op::Null => Null("eq null"),
        Op::NotNull => Null("ne null"),
        Op::Like => Like { negated: false },
        Op::NotLike => Like { negated: true },
        Op::BeginsWith => StringFunction {
            function: "startswith",
            negated: false,
        },
        Op::NotBeginWith => StringFunction {
            function: "startswith",
            negated: true,
        },
        Op::EndsWith => StringFunction {
            function: "endswith",
            negated: false,
        },
        Op::NotEndWith => StringFunction {
            function: "endswith",
            negated: true,
        },

        Op::In => function_of("In", Many, ValueType::String),
        Op::NotIn => function_of("NotIn", Many, ValueType::String),
        Op::Between => function_of("Between", Many, ValueType::String),
        Op::NotBetween => function_of("NotBetween", Many, ValueType::String),
        Op::ContainValues => function_of("ContainValues", Many, ValueType::String),
        Op::NotContainValues => function_of("DoesNotContainValues", Many, ValueType::String),

        Op::On => function_of("On", Single, ValueType::String),
        Op::OnOrAfter => function_of("OnOrAfter", Single, ValueType::String),
        Op::OnOrBefore => function_of("OnOrBefore", Single, ValueType::String),
        Op::Under => function_of("Under", Single, ValueType::String),
        Op::EqOrUnder => function_of("UnderOrEqual", Single, ValueType::String),
        Op::NotUnder => function_of("NotUnder", Single, ValueType::String),
        Op::Above => function_of("Above", Single, ValueType::String),
        Op::EqOrAbove => function_of("AboveOrEqual", Single, ValueType::String),

        Op::LastXHours => function_of("LastXHours", Single, ValueType::BigInt),
        Op::LastXDays => function_of("LastXDays", Single, ValueType::BigInt),
        Op::LastXWeeks => function_of("LastXWeeks", Single, ValueType::BigInt),
        Op::LastXMonths => function_of("LastXMonths", Single, ValueType::BigInt),
        Op::LastXYears => function_of("LastXYears", Single, ValueType::BigInt),
        Op::LastXFiscalYears => function_of("LastXFiscalYears", Single, ValueType::BigInt),
        Op::LastXFiscalPeriods => function_of("LastXFiscalPeriods", Single, ValueType::BigInt),
        Op::NextXHours => function_of("NextXHours", Single, ValueType::BigInt),
        Op::NextXDays => function_of("NextXDays", Single, ValueType::BigInt),
        Op::NextXWeeks => function_of("NextXWeeks", Single, ValueType::BigInt),
        Op::NextXMonths => function_of("NextXMonths", Single, ValueType::BigInt),
        Op::NextXYears => function_of("NextXYears", Single, ValueType::BigInt),
        Op::NextXFiscalYears => function_of("NextXFiscalYears", Single, ValueType::BigInt),
        Op::NextXFiscalPeriods => function_of("NextXFiscalPeriods", Single, ValueType::BigInt),
        Op::OlderThanXMinutes => function_of("OlderThanXMinutes", Single, ValueType::BigInt),
        Op::OlderThanXHours => function_of("OlderThanXHours", Single, ValueType::BigInt),
        Op::OlderThanXDays => function_of("OlderThanXDays", Single, ValueType::BigInt),
        Op::OlderThanXWeeks => function_of("OlderThanXWeeks", Single, ValueType::BigInt),
        Op::OlderThanXMonths => function_of("OlderThanXMonths", Single, ValueType::BigInt),
        Op::OlderThanXYears => function_of("OlderThanXYears", Single, ValueType::BigInt),
        Op::InFiscalYear => function_of("InFiscalYear", Single, ValueType::BigInt),
        Op::InFiscalPeriod => function_of("InFiscalPeriod", Single, ValueType::BigInt),

        Op::InFiscalPeriodAndYear => function_of("InFiscalPeriodAndYear", Pair, ValueType::BigInt),
        Op::InOrAfterFiscalPeriodAndYear => {
            function_of("InOrAfterFiscalPeriodAndYear", Pair, ValueType::BigInt)
        }
        Op::InOrBeforeFiscalPeriodAndYear => {
            function_of("InOrBeforeFiscalPeriodAndYear", Pair, ValueType::BigInt)
        }

        Op::Yesterday => function("Yesterday"),
        Op::Today => function("Today"),
        Op::Tomorrow => function("Tomorrow"),
        Op::LastSevenDays => function("Last7Days"),
        Op::NextSevenDays => function("Next7Days"),
        Op::LastWeek => function("LastWeek"),
        Op::ThisWeek => function("ThisWeek"),
        Op::NextWeek => function("NextWeek"),
        Op::LastMonth => function("LastMonth"),
        Op::ThisMonth => function("ThisMonth"),
        Op::NextMonth => function("NextMonth"),
        Op::LastYear => function("LastYear"),
        Op::ThisYear => function("ThisYear"),
        Op::NextYear => function("NextYear"),
        Op::LastFiscalYear => function("LastFiscalYear"),
        Op::ThisFiscalYear => function("ThisFiscalYear"),
        Op::NextFiscalYear => function("NextFiscalYear"),
        Op::LastFiscalPeriod => function("LastFiscalPeriod"),
        Op::ThisFiscalPeriod => function("ThisFiscalPeriod"),
        Op::NextFiscalPeriod => function("NextFiscalPeriod"),
        Op::EqUserId => function("EqualUserId"),
        Op::NeUserId => function("NotEqualUserId"),
        Op::EqUserTeams => function("EqualUserTeams"),
        Op::EqUserOrUserTeams => function("EqualUserOrUserTeams"),
        Op::EqUserOrUserHierarchy => function("EqualUserOrUserHierarchy"),
        Op::EqUserOrUserHierarchyAndTeams => function("EqualUserOrUserHierarchyAndTeams"),
        Op::EqBusinessId => function("EqualBusinessId"),
        Op::NeBusinessId => function("NotEqualBusinessId"),
        Op::EqUserLanguage => function("EqualUserLanguage"),
    }
}
