//! Bracketed notation of containers.
//!
//! A container prints as nested lists, one bracket level per axis, e.g. a
//! 2 x 2 matrix `[[a,b][c,d]]`. Elements inside a list are separated by
//! commas; sublists may or may not be. An element in braces, such as an
//! octonion `{1,0,0,0,0,0,0,0}`, is one leaf.

use alloc::{vec, vec::Vec};
use core::fmt;

use tracing::debug;

use crate::{
    error::{AlgebraError, Result},
    shape::element_count,
};

/// A parsed bracket expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextNode<'a> {
    /// Text of one scalar.
    Leaf(&'a str),
    /// A bracketed list.
    List(Vec<TextNode<'a>>),
}

impl<'a> TextNode<'a> {
    /// Extent of every nesting level.
    ///
    /// Fails when sibling lists disagree in shape.
    pub fn shape(&self) -> Result<Vec<usize>> {
        match self {
            TextNode::Leaf(_) => Ok(Vec::new()),
            TextNode::List(children) => {
                let Some(first) = children.first() else {
                    return Ok(vec![0]);
                };
                let inner = first.shape()?;
                for child in &children[1..] {
                    let other = child.shape()?;
                    if other != inner {
                        debug!(?inner, ?other, "inconsistent nested rows");
                        return Err(AlgebraError::invalid(
                            "rows of inconsistent dimension",
                        ));
                    }
                }
                let mut dims = vec![children.len()];
                dims.extend(inner);
                Ok(dims)
            }
        }
    }

    /// Leaves in row-major order.
    pub fn leaves(&self) -> Vec<&'a str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<&'a str>) {
        match self {
            TextNode::Leaf(s) => out.push(*s),
            TextNode::List(children) => {
                for c in children {
                    c.collect_leaves(out);
                }
            }
        }
    }
}

/// Parses `input` and returns its shape with its leaves in row-major order.
pub fn parse_shaped(input: &str) -> Result<(Vec<usize>, Vec<&str>)> {
    let node = parse_nested(input)?;
    let dims = node.shape()?;
    let leaves = node.leaves();
    debug_assert_eq!(leaves.len(), element_count(&dims));
    Ok((dims, leaves))
}

/// Parses one bracket expression spanning all of `input`.
pub fn parse_nested(input: &str) -> Result<TextNode<'_>> {
    let mut parser = Parser { input, pos: 0 };
    let node = parser.node()?;
    parser.skip_ws();
    if parser.pos != input.len() {
        return Err(AlgebraError::parse(input, "trailing characters"));
    }
    Ok(node)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn node(&mut self) -> Result<TextNode<'a>> {
        self.skip_ws();
        match self.peek() {
            Some(b'[') => self.list(),
            Some(_) => self.leaf(),
            None => Err(AlgebraError::parse(self.input, "unexpected end of input")),
        }
    }

    fn list(&mut self) -> Result<TextNode<'a>> {
        self.pos += 1;
        let mut children = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    return Ok(TextNode::List(children));
                }
                Some(b',') if !children.is_empty() => self.pos += 1,
                Some(_) => children.push(self.node()?),
                None => return Err(AlgebraError::parse(self.input, "unclosed '['")),
            }
        }
    }

    fn leaf(&mut self) -> Result<TextNode<'a>> {
        let start = self.pos;
        if self.peek() == Some(b'{') {
            let close = self.input[start..]
                .find('}')
                .ok_or_else(|| AlgebraError::parse(self.input, "unclosed '{'"))?;
            self.pos = start + close + 1;
            return Ok(TextNode::Leaf(&self.input[start..self.pos]));
        }
        while let Some(b) = self.peek() {
            if matches!(b, b',' | b'[' | b']' | b'{' | b'}') {
                break;
            }
            self.pos += 1;
        }
        let token = self.input[start..self.pos].trim();
        if token.is_empty() {
            return Err(AlgebraError::parse(self.input, "empty element"));
        }
        Ok(TextNode::Leaf(token))
    }
}

/// Writes `element_count(dims)` elements in nested bracket notation.
pub fn write_nested<W, F>(w: &mut W, dims: &[usize], mut leaf: F) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    F: FnMut(&mut W, usize) -> fmt::Result,
{
    if dims.is_empty() {
        return leaf(w, 0);
    }
    write_level(w, dims, 0, &mut leaf)
}

fn write_level<W, F>(w: &mut W, dims: &[usize], offset: usize, leaf: &mut F) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    F: FnMut(&mut W, usize) -> fmt::Result,
{
    w.write_char('[')?;
    let inner = element_count(&dims[1..]);
    for k in 0..dims[0] {
        if dims.len() == 1 {
            if k > 0 {
                w.write_char(',')?;
            }
            leaf(w, offset + k)?;
        } else {
            write_level(w, &dims[1..], offset + k * inner, leaf)?;
        }
    }
    w.write_char(']')
}
