//! CSS Selectors Module
//!
//! Parses selector lists (`ul > li.item, #main [data-x]`) and matches
//! them against elements of a [`DomTree`].
//!
//! Matching runs right to left: the last compound is tested against the
//! candidate, then combinators walk to parents or previous siblings.
//! Pseudo-elements have no meaning for element queries and are rejected.

use std::fmt;
use std::str::FromStr;

use crate::{DomTree, ElementData, NodeData, NodeId};

/// Selector parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected character {ch:?} at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Unexpected end of selector")]
    UnexpectedEnd,

    #[error("Combinator at offset {pos} has no right-hand side")]
    DanglingCombinator { pos: usize },

    #[error("Unknown pseudo-class :{0}")]
    UnknownPseudoClass(String),

    #[error("Pseudo-element ::{0} cannot match elements")]
    UnsupportedPseudoElement(String),

    #[error("Invalid An+B expression {0:?}")]
    InvalidNth(String),
}

/// A comma-separated list of complex selectors
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
    source: String,
}

/// Compound selectors joined by combinators
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
    /// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

/// Simple selectors that all apply to one element
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// Relationship between two compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// A component of a selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :nth-child(), etc.
    PseudoClass(PseudoClass),
}

/// Pseudo-class type
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    // Tree-structural pseudo-classes
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),

    // Logical pseudo-classes
    Not(SelectorList),
    Is(SelectorList),
    Where(SelectorList),

    /// The query scope (`:root` when there is none)
    Scope,

    // Input pseudo-classes, attribute driven
    Checked,
    Disabled,
    Enabled,
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// Create "odd" expression (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// Create "even" expression (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// Create a simple index (0n+b)
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    /// Create An+B expression
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        // Try to parse as simple number
        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        // Parse An+B format
        let s = s.replace(' ', "");
        let n_pos = s.find('n')?;
        let a_str = &s[..n_pos];
        let a = match a_str {
            "" | "+" => 1,
            "-" => -1,
            _ => a_str.parse().ok()?,
        };

        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else if rest.starts_with('+') || rest.starts_with('-') {
            rest.parse().ok()?
        } else {
            return None;
        };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        // Widened: coefficients may be anywhere in i32
        let (a, diff) = (i64::from(self.a), i64::from(n) - i64::from(self.b));
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (matcher, val) = match (&self.matcher, value) {
            (None, value) => return value.is_some(),
            (Some(_), None) => return false,
            (Some(matcher), Some(val)) => (matcher, val),
        };

        let fold = |s: &str| if self.case_insensitive { s.to_lowercase() } else { s.to_string() };
        let val = fold(val);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected.as_str()),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected.as_str());
                !expected.is_empty() && val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected.as_str());
                val == expected || val.starts_with(&format!("{expected}-"))
            }
            // Empty operands never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && val.starts_with(&fold(expected.as_str()))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && val.ends_with(&fold(expected.as_str()))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && val.contains(&fold(expected.as_str()))
            }
        }
    }
}

// ============================================================================
// MATCHING
// ============================================================================

struct MatchContext<'a> {
    tree: &'a DomTree,
    scope: Option<NodeId>,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser::new(input);
        parser.skip_whitespace();
        if parser.peek().is_none() {
            return Err(SelectorError::Empty);
        }
        let selectors = parser.parse_list()?;
        if let Some(ch) = parser.peek() {
            return Err(SelectorError::UnexpectedChar { ch, pos: parser.pos });
        }
        Ok(Self { selectors, source: input.trim().to_string() })
    }

    /// The selector text as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of comma-separated selectors
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Always false for a parsed list
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Complex selectors in this list
    pub fn selectors(&self) -> &[ComplexSelector] {
        &self.selectors
    }

    /// Check whether `node` matches any selector in the list.
    ///
    /// `scope` is the element `:scope` refers to; non-elements never match.
    pub fn matches(&self, tree: &DomTree, node: NodeId, scope: Option<NodeId>) -> bool {
        let cx = MatchContext { tree, scope };
        self.matches_in(&cx, node)
    }

    fn matches_in(&self, cx: &MatchContext<'_>, node: NodeId) -> bool {
        cx.tree.is_element(node)
            && self.selectors.iter().any(|sel| sel.matches_from(cx, sel.compounds.len() - 1, node))
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl ComplexSelector {
    /// Compounds in source order
    pub fn compounds(&self) -> &[CompoundSelector] {
        &self.compounds
    }

    /// Combinators in source order
    pub fn combinators(&self) -> &[Combinator] {
        &self.combinators
    }

    fn matches_from(&self, cx: &MatchContext<'_>, idx: usize, node: NodeId) -> bool {
        let Some(elem) = cx.tree.element(node) else {
            return false;
        };
        if !self.compounds[idx].matches(cx, node, elem) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        let tree = cx.tree;
        match self.combinators[idx - 1] {
            Combinator::Descendant => tree
                .ancestors(node)
                .filter(|&a| tree.is_element(a))
                .any(|a| self.matches_from(cx, idx - 1, a)),
            Combinator::Child => tree
                .parent(node)
                .is_some_and(|p| self.matches_from(cx, idx - 1, p)),
            Combinator::NextSibling => tree
                .previous_element_sibling(node)
                .is_some_and(|s| self.matches_from(cx, idx - 1, s)),
            Combinator::SubsequentSibling => {
                let mut cur = tree.previous_element_sibling(node);
                while let Some(sib) = cur {
                    if self.matches_from(cx, idx - 1, sib) {
                        return true;
                    }
                    cur = tree.previous_element_sibling(sib);
                }
                false
            }
        }
    }
}

impl CompoundSelector {
    fn matches(&self, cx: &MatchContext<'_>, node: NodeId, elem: &ElementData) -> bool {
        self.components.iter().all(|c| match_component(cx, c, node, elem))
    }
}

fn match_component(
    cx: &MatchContext<'_>,
    component: &SelectorComponent,
    node: NodeId,
    elem: &ElementData,
) -> bool {
    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => elem.tag_name().eq_ignore_ascii_case(tag),
        SelectorComponent::Id(id) => elem.id() == Some(id.as_str()),
        SelectorComponent::Class(class) => elem.class_list().contains(class),
        SelectorComponent::Attribute(attr) => attr.matches(elem.get_attr(&attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(cx, pseudo, node, elem),
    }
}

/// 1-based position among element siblings, overall and of the same type
struct SiblingPosition {
    index: usize,
    count: usize,
    type_index: usize,
    type_count: usize,
}

impl SiblingPosition {
    fn of(tree: &DomTree, node: NodeId, elem: &ElementData) -> Self {
        let mut pos = Self { index: 1, count: 1, type_index: 1, type_count: 1 };
        let Some(parent) = tree.parent(node) else {
            return pos;
        };

        pos.count = 0;
        pos.type_count = 0;
        for sib in tree.element_children(parent) {
            let same_type = tree
                .element(sib)
                .is_some_and(|e| e.tag_name() == elem.tag_name());
            if sib == node {
                pos.index = pos.count + 1;
                pos.type_index = pos.type_count + 1;
            }
            pos.count += 1;
            if same_type {
                pos.type_count += 1;
            }
        }
        pos
    }
}

const FORM_CONTROLS: &[&str] = &[
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

/// Match a pseudo-class against an element
fn match_pseudo_class(
    cx: &MatchContext<'_>,
    pseudo: &PseudoClass,
    node: NodeId,
    elem: &ElementData,
) -> bool {
    let tree = cx.tree;
    let position = || SiblingPosition::of(tree, node, elem);
    let is_root = || {
        tree.parent(node)
            .and_then(|p| tree.get(p))
            .is_some_and(|p| matches!(p.data, NodeData::Document))
    };

    match pseudo {
        PseudoClass::Root => is_root(),
        PseudoClass::Empty => tree
            .children(node)
            .all(|(_, child)| matches!(child.data, NodeData::Comment(_))),
        PseudoClass::FirstChild => position().index == 1,
        PseudoClass::LastChild => {
            let p = position();
            p.index == p.count
        }
        PseudoClass::OnlyChild => position().count == 1,
        PseudoClass::FirstOfType => position().type_index == 1,
        PseudoClass::LastOfType => {
            let p = position();
            p.type_index == p.type_count
        }
        PseudoClass::OnlyOfType => position().type_count == 1,
        PseudoClass::NthChild(expr) => expr.matches(position().index as i32),
        PseudoClass::NthLastChild(expr) => {
            let p = position();
            expr.matches((p.count - p.index + 1) as i32)
        }
        PseudoClass::NthOfType(expr) => expr.matches(position().type_index as i32),
        PseudoClass::NthLastOfType(expr) => {
            let p = position();
            expr.matches((p.type_count - p.type_index + 1) as i32)
        }

        PseudoClass::Not(list) => !list.matches_in(cx, node),
        PseudoClass::Is(list) | PseudoClass::Where(list) => list.matches_in(cx, node),

        PseudoClass::Scope => match cx.scope {
            Some(scope) if scope != NodeId::ROOT => scope == node,
            _ => is_root(),
        },

        PseudoClass::Checked => match elem.tag_name() {
            "option" => elem.has_attr("selected"),
            "input" => elem.has_attr("checked"),
            _ => false,
        },
        PseudoClass::Disabled => {
            FORM_CONTROLS.contains(&elem.tag_name()) && elem.has_attr("disabled")
        }
        PseudoClass::Enabled => {
            FORM_CONTROLS.contains(&elem.tag_name()) && !elem.has_attr("disabled")
        }
    }
}

// ============================================================================
// PARSING
// ============================================================================

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        match self.bump() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(SelectorError::UnexpectedChar { ch, pos: self.pos - ch.len_utf8() }),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(ch) => SelectorError::UnexpectedChar { ch, pos: self.pos },
            None => SelectorError::UnexpectedEnd,
        }
    }

    /// Skip whitespace, reporting whether any was consumed
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn parse_list(&mut self) -> Result<Vec<ComplexSelector>, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            self.skip_whitespace();
            if self.peek() == Some(',') {
                self.bump();
            } else {
                return Ok(selectors);
            }
        }
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let combinator_pos = self.pos;
            let combinator = match self.peek() {
                None | Some(',') | Some(')') => break,
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(_) if had_space => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };
            if combinator != Combinator::Descendant {
                self.bump();
                self.skip_whitespace();
            }
            if matches!(self.peek(), None | Some(',') | Some(')')) {
                return Err(SelectorError::DanglingCombinator { pos: combinator_pos });
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector { compounds, combinators })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();

        match self.peek() {
            Some('*') => {
                self.bump();
                components.push(SelectorComponent::Universal);
            }
            _ if self.at_ident_start() => {
                let tag = self.parse_ident()?;
                components.push(SelectorComponent::Type(tag.to_ascii_lowercase()));
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    components.push(SelectorComponent::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.bump();
                    components.push(SelectorComponent::Class(self.parse_ident()?));
                }
                Some('[') => {
                    self.bump();
                    components.push(SelectorComponent::Attribute(self.parse_attribute()?));
                }
                Some(':') => {
                    self.bump();
                    components.push(SelectorComponent::PseudoClass(self.parse_pseudo()?));
                }
                _ => break,
            }
        }

        if components.is_empty() {
            return Err(self.unexpected());
        }
        Ok(CompoundSelector { components })
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttributeSelector { name, matcher: None, case_insensitive: false });
            }
            Some('=') => {
                self.bump();
                '='
            }
            Some(op @ ('~' | '|' | '^' | '$' | '*')) if self.peek_nth(1) == Some('=') => {
                self.bump();
                self.bump();
                op
            }
            _ => return Err(self.unexpected()),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                self.parse_string(quote)?
            }
            _ => self.parse_ident()?,
        };
        self.skip_whitespace();

        let mut case_insensitive = false;
        if let Some(flag @ ('i' | 'I' | 's' | 'S')) = self.peek() {
            self.bump();
            case_insensitive = flag.eq_ignore_ascii_case(&'i');
            self.skip_whitespace();
        }
        self.expect(']')?;

        let matcher = match op {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };
        Ok(AttributeSelector { name, matcher: Some(matcher), case_insensitive })
    }

    fn parse_pseudo(&mut self) -> Result<PseudoClass, SelectorError> {
        if self.peek() == Some(':') {
            self.bump();
            let name = self.parse_ident()?;
            return Err(SelectorError::UnsupportedPseudoElement(name.to_ascii_lowercase()));
        }

        let name = self.parse_ident()?.to_ascii_lowercase();
        if self.peek() != Some('(') {
            return match name.as_str() {
                "root" => Ok(PseudoClass::Root),
                "empty" => Ok(PseudoClass::Empty),
                "first-child" => Ok(PseudoClass::FirstChild),
                "last-child" => Ok(PseudoClass::LastChild),
                "only-child" => Ok(PseudoClass::OnlyChild),
                "first-of-type" => Ok(PseudoClass::FirstOfType),
                "last-of-type" => Ok(PseudoClass::LastOfType),
                "only-of-type" => Ok(PseudoClass::OnlyOfType),
                "scope" => Ok(PseudoClass::Scope),
                "checked" => Ok(PseudoClass::Checked),
                "disabled" => Ok(PseudoClass::Disabled),
                "enabled" => Ok(PseudoClass::Enabled),
                // Legacy single-colon pseudo-elements
                "before" | "after" | "first-line" | "first-letter" => {
                    Err(SelectorError::UnsupportedPseudoElement(name))
                }
                _ => Err(SelectorError::UnknownPseudoClass(name)),
            };
        }

        self.bump();
        let pseudo = match name.as_str() {
            "nth-child" => PseudoClass::NthChild(self.parse_nth_argument()?),
            "nth-last-child" => PseudoClass::NthLastChild(self.parse_nth_argument()?),
            "nth-of-type" => PseudoClass::NthOfType(self.parse_nth_argument()?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(self.parse_nth_argument()?),
            "not" | "is" | "where" => {
                let start = self.pos;
                let selectors = self.parse_list()?;
                let source = self.input[start..self.pos].trim().to_string();
                let list = SelectorList { selectors, source };
                match name.as_str() {
                    "not" => PseudoClass::Not(list),
                    "is" => PseudoClass::Is(list),
                    _ => PseudoClass::Where(list),
                }
            }
            _ => return Err(SelectorError::UnknownPseudoClass(name)),
        };
        self.skip_whitespace();
        self.expect(')')?;
        Ok(pseudo)
    }

    fn parse_nth_argument(&mut self) -> Result<NthExpression, SelectorError> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == ')' {
                break;
            }
            self.bump();
        }
        let raw = &self.input[start..self.pos];
        NthExpression::parse(raw).ok_or_else(|| SelectorError::InvalidNth(raw.trim().to_string()))
    }

    fn parse_string(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(SelectorError::UnexpectedEnd),
                Some(ch) if ch == quote => return Ok(out),
                Some('\\') => out.push(self.parse_escape()?),
                Some(ch) => out.push(ch),
            }
        }
    }

    fn at_ident_start(&self) -> bool {
        let is_start = |c: char| c.is_ascii_alphabetic() || c == '_' || !c.is_ascii() || c == '\\';
        match self.peek() {
            Some('-') => self.peek_nth(1).is_some_and(|c| is_start(c) || c == '-'),
            Some(c) => is_start(c),
            None => false,
        }
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        if !self.at_ident_start() {
            return Err(self.unexpected());
        }
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\\' {
                self.bump();
                out.push(self.parse_escape()?);
            } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() {
                self.bump();
                out.push(ch);
            } else {
                break;
            }
        }
        Ok(out)
    }

    /// Escape body after a backslash: up to six hex digits or one literal char
    fn parse_escape(&mut self) -> Result<char, SelectorError> {
        let start = self.pos;
        while self.pos - start < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.bump();
        }
        if self.pos == start {
            return self.bump().ok_or(SelectorError::UnexpectedEnd);
        }
        let code = u32::from_str_radix(&self.input[start..self.pos], 16).unwrap_or(0xFFFD);
        if self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        Ok(char::from_u32(code).filter(|&c| c != '\0').unwrap_or('\u{FFFD}'))
    }
}
