/*
Example I/O

A
+--B
|  +--C
|  +--D
|     +--G
+--F

Every non-root row carries exactly 3 columns of decoration per level:
`+--` on the node's own row, `|  ` below a node that still has a later
sibling, `   ` below a last sibling.
 */
use std::fmt::Display;

use tracing::{debug, instrument};

use crate::domain::{NodeId, TreeArena};
use crate::driver::error::DriverResult;
use crate::driver::{Driver, LineEnding, NodeFactory};

const CONNECTOR: &str = "+--";
const PIPE: &str = "|  ";
const BLANK: &str = "   ";
const CHILD_MARKER: char = '+';
const DECORATION_WIDTH: usize = 3;
const ESCAPED_EOL: &str = "\\n";

/// Driver for boxed ascii trees like the one above.
///
/// Labels are rendered with `Display`; line separators inside a label are
/// escaped to a literal `\n`, and labels are trimmed both ways.
#[derive(Debug, Clone)]
pub struct AsciiDriver<F> {
    factory: F,
    line_ending: LineEnding,
}

impl<F> AsciiDriver<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            line_ending: LineEnding::default(),
        }
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// With `CrLf` a bare `\n` is escaped too, so one node is always one row.
    pub fn escape(&self, label: &str) -> String {
        let escaped = label.replace(self.line_ending.as_str(), ESCAPED_EOL);
        let escaped = match self.line_ending {
            LineEnding::Lf => escaped,
            LineEnding::CrLf => escaped.replace('\n', ESCAPED_EOL),
        };
        escaped.trim().to_string()
    }

    pub fn unescape(&self, label: &str) -> String {
        label
            .replace(ESCAPED_EOL, self.line_ending.as_str())
            .trim()
            .to_string()
    }

    /// One row per node, pre-order.
    #[instrument(level = "debug", skip(self, arena))]
    pub fn node_to_lines<V: Display>(
        &self,
        arena: &TreeArena<V>,
        root: NodeId,
    ) -> DriverResult<Vec<String>> {
        let mut lines = Vec::new();
        // (node, prefix of its own row, prefix inherited by its children's rows)
        let mut stack = vec![(root, String::new(), String::new())];

        while let Some((idx, row_prefix, child_prefix)) = stack.pop() {
            let node = arena.get_node(idx)?;
            lines.push(format!(
                "{row_prefix}{}",
                self.escape(&node.value().to_string())
            ));

            let children = node.children();
            for (position, &child) in children.iter().enumerate().rev() {
                let continuation = if position + 1 == children.len() {
                    BLANK
                } else {
                    PIPE
                };
                stack.push((
                    child,
                    format!("{child_prefix}{CONNECTOR}"),
                    format!("{child_prefix}{continuation}"),
                ));
            }
        }

        debug!(rows = lines.len(), "tree encoded");
        Ok(lines)
    }

    /// Rebuilds a tree from rows, creating nodes through the factory.
    ///
    /// Expects rows produced by [`node_to_lines`](Self::node_to_lines) or an
    /// equivalent encoder; an empty slice yields a single node with an empty label.
    /// On error every node created so far is removed from `arena` again.
    #[instrument(level = "debug", skip(self, arena, lines))]
    pub fn lines_to_node<V>(
        &self,
        arena: &mut TreeArena<V>,
        lines: &[&str],
    ) -> DriverResult<NodeId>
    where
        F: NodeFactory<V>,
    {
        let (first, rest) = lines.split_first().map_or(("", &[][..]), |(f, r)| (*f, r));
        let root = self
            .factory
            .create_node_from_label(arena, &self.unescape(first))?;

        if let Err(e) = self.build_children(arena, root, rest) {
            let _ = arena.remove(root);
            debug!(error = %e, "decode failed, partial tree removed");
            return Err(e);
        }

        debug!(rows = lines.len(), "tree decoded");
        Ok(root)
    }

    fn build_children<V>(
        &self,
        arena: &mut TreeArena<V>,
        root: NodeId,
        rows: &[&str],
    ) -> DriverResult<()>
    where
        F: NodeFactory<V>,
    {
        let mut stack: Vec<(NodeId, Vec<&str>)> = split_child_blocks(rows)
            .into_iter()
            .rev()
            .map(|block| (root, block))
            .collect();

        while let Some((parent, block)) = stack.pop() {
            let (first, rest) = block.split_first().map_or(("", &[][..]), |(f, r)| (*f, r));
            let idx = self
                .factory
                .create_node_from_label(arena, &self.unescape(first))?;
            if let Err(e) = arena.add_child(parent, idx) {
                // not attached yet, so removing the root would miss it
                let _ = arena.remove(idx);
                return Err(e.into());
            }

            stack.extend(
                split_child_blocks(rest)
                    .into_iter()
                    .rev()
                    .map(|child_block| (idx, child_block)),
            );
        }
        Ok(())
    }
}

impl<V, F> Driver<V> for AsciiDriver<F>
where
    V: Display,
    F: NodeFactory<V>,
{
    fn node_to_string(&self, arena: &TreeArena<V>, root: NodeId) -> DriverResult<String> {
        Ok(self
            .node_to_lines(arena, root)?
            .join(self.line_ending.as_str()))
    }

    fn string_to_node(
        &self,
        arena: &mut TreeArena<V>,
        input: &str,
    ) -> DriverResult<Option<NodeId>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let lines: Vec<&str> = input.split(self.line_ending.as_str()).collect();
        self.lines_to_node(arena, &lines).map(Some)
    }
}

/// Groups rows into one block per child, with decoration stripped.
///
/// A row starting with `+` opens a new block; any other row continues the
/// current one (or opens the first block if none is open yet).
fn split_child_blocks<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut blocks: Vec<Vec<&'a str>> = Vec::new();
    for &line in lines {
        let stripped = strip_decoration(line);
        match blocks.last_mut() {
            Some(current) if !line.starts_with(CHILD_MARKER) => current.push(stripped),
            _ => blocks.push(vec![stripped]),
        }
    }
    blocks
}

fn strip_decoration(line: &str) -> &str {
    line.char_indices()
        .nth(DECORATION_WIDTH)
        .map_or("", |(offset, _)| &line[offset..])
}
