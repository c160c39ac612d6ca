//! Tagged values and the policy that tells explicit from implicit tagging.
//!
//! Without a schema the decoder cannot know whether `[1] { ... }` wraps one
//! explicitly tagged value or replaces the tag of a SEQUENCE. The decoder
//! reads the children first and hands them to a [`TaggingPolicy`] together
//! with the tag.
//!
//! [`ChildCountHeuristic`] guesses from the number of children: none is an
//! empty tag, one is explicit tagging, more is an implicitly tagged
//! sequence. An implicitly tagged SEQUENCE that holds exactly one value is
//! therefore reported as explicit. Callers that know their schema can supply
//! their own policy.

use std::fmt::Display;

use ber::{Tag, TagClass};

use crate::error::Result;
use crate::{Element, Elements, Framing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tagging {
    /// The inner value carries its own tag.
    Explicit,
    /// The inner value's tag was replaced by the context tag.
    Implicit,
}

/// A context-specific, application or private value.
///
/// `inner` is `None` only for the empty tag (a constructed tag with no
/// contents). An implicit tag on primitive contents always holds an
/// [`Element::OctetString`] with the raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged {
    tag: Tag,
    tagging: Tagging,
    framing: Framing,
    inner: Option<Box<Element>>,
}

impl Tagged {
    pub fn explicit(tag: Tag, inner: Element, framing: Framing) -> Self {
        Tagged {
            tag: tag.with_constructed(true),
            tagging: Tagging::Explicit,
            framing,
            inner: Some(Box::new(inner)),
        }
    }

    // the constructed bit follows the inner value; primitive contents only
    // ever reach here as an octet string, through `implicit_octets`
    fn implicit(tag: Tag, inner: Element, framing: Framing) -> Self {
        Tagged {
            tag: tag.with_constructed(inner.tag().is_constructed()),
            tagging: Tagging::Implicit,
            framing,
            inner: Some(Box::new(inner)),
        }
    }

    /// Implicit tagging of primitive contents, which stay uninterpreted.
    pub fn implicit_octets(tag: Tag, contents: Vec<u8>) -> Self {
        Self::implicit(
            tag,
            Element::OctetString(contents.into()),
            Framing::Definite,
        )
    }

    /// Implicit tagging of a SEQUENCE rebuilt from the tag's children.
    pub fn implicit_sequence(tag: Tag, elements: Elements, framing: Framing) -> Self {
        Self::implicit(tag, Element::Sequence { elements, framing }, framing)
    }

    pub fn empty(tag: Tag, framing: Framing) -> Self {
        Tagged {
            tag: tag.with_constructed(true),
            tagging: Tagging::Explicit,
            framing,
            inner: None,
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn class(&self) -> TagClass {
        self.tag.class()
    }

    pub fn number(&self) -> u8 {
        self.tag.number()
    }

    pub fn tagging(&self) -> Tagging {
        self.tagging
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    pub fn inner(&self) -> Option<&Element> {
        self.inner.as_deref()
    }

    pub fn into_inner(self) -> Option<Element> {
        self.inner.map(|inner| *inner)
    }
}

impl Display for Tagged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.tagging {
            Tagging::Explicit => "EXPLICIT",
            Tagging::Implicit => "IMPLICIT",
        };
        match &self.inner {
            Some(inner) => write!(
                f,
                "[{} {}] {} {}",
                self.tag.class(),
                self.tag.number(),
                mode,
                inner
            ),
            None => write!(f, "[{} {}] EMPTY", self.tag.class(), self.tag.number()),
        }
    }
}

/// What a policy knows about a constructed tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagContext {
    pub tag: Tag,
    pub framing: Framing,
}

/// Decides how the children of a constructed tagged value are wrapped.
pub trait TaggingPolicy {
    fn resolve(&self, context: TagContext, children: Elements) -> Result<Tagged>;
}

/// Infers the tagging mode from the number of children.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildCountHeuristic;

impl TaggingPolicy for ChildCountHeuristic {
    fn resolve(&self, context: TagContext, children: Elements) -> Result<Tagged> {
        let TagContext { tag, framing } = context;
        let mut children = children.into_iter();
        let tagged = match (children.next(), children.next()) {
            (None, _) => Tagged::empty(tag, framing),
            (Some(inner), None) => Tagged::explicit(tag, inner, framing),
            (Some(first), Some(second)) => {
                let elements = [first, second].into_iter().chain(children).collect();
                Tagged::implicit_sequence(tag, elements, framing)
            }
        };
        log::debug!(
            "resolved [{} {}] with {} framing as {}",
            tag.class(),
            tag.number(),
            framing_name(framing),
            tagging_name(&tagged)
        );
        Ok(tagged)
    }
}

/// Treats every non-empty constructed tag as an implicitly tagged SEQUENCE.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysImplicit;

impl TaggingPolicy for AlwaysImplicit {
    fn resolve(&self, context: TagContext, children: Elements) -> Result<Tagged> {
        if children.is_empty() {
            return Ok(Tagged::empty(context.tag, context.framing));
        }
        Ok(Tagged::implicit_sequence(
            context.tag,
            children,
            context.framing,
        ))
    }
}

fn framing_name(framing: Framing) -> &'static str {
    match framing {
        Framing::Definite => "definite",
        Framing::Indefinite => "indefinite",
    }
}

fn tagging_name(tagged: &Tagged) -> &'static str {
    match (tagged.is_empty(), tagged.tagging()) {
        (true, _) => "empty",
        (false, Tagging::Explicit) => "explicit",
        (false, Tagging::Implicit) => "implicit sequence",
    }
}
