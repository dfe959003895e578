//! Block-scoped and file-scoped annotation regions.

use super::marker::{Marker, MarkerKind};
use super::value::Annotations;
use crate::base::{TextRange, TextSize};

/// A `sourcery:begin` ... `sourcery:end` region.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRegion {
    pub scope: Option<String>,
    pub annotations: Annotations,
    /// From the end of the begin marker to the start of the end marker (or EOF)
    pub range: TextRange,
    /// Nesting depth when opened; outermost is 0
    pub depth: usize,
}

/// A problem found while pairing block markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockIssue {
    pub message: String,
    pub range: TextRange,
}

/// All annotation regions of one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileRegions {
    pub blocks: Vec<BlockRegion>,
    pub file: Annotations,
    pub issues: Vec<BlockIssue>,
}

struct OpenBlock {
    scope: Option<String>,
    annotations: Annotations,
    start: TextSize,
}

impl FileRegions {
    /// Pair block markers and gather file markers from the file's comments.
    ///
    /// `comments` are `(text, range)` pairs in source order. An unnamed end
    /// closes the innermost open block; a named end closes that block and
    /// every block opened after it. Blocks still open run to `file_end`.
    pub fn collect<'a>(
        comments: impl IntoIterator<Item = (&'a str, TextRange)>,
        file_end: TextSize,
    ) -> Self {
        let mut regions = Self::default();
        let mut open: Vec<OpenBlock> = Vec::new();

        for (text, range) in comments {
            let Some(marker) = Marker::parse(text) else {
                continue;
            };
            match marker.kind {
                MarkerKind::Inline => {}
                MarkerKind::File => {
                    for (key, value) in marker.annotations.iter() {
                        regions.file.insert(key.clone(), value.clone());
                    }
                }
                MarkerKind::Begin { scope } => open.push(OpenBlock {
                    scope,
                    annotations: marker.annotations,
                    start: range.end(),
                }),
                MarkerKind::End { scope } => {
                    let position = match &scope {
                        None => open.len().checked_sub(1),
                        Some(name) => open.iter().rposition(|b| b.scope.as_ref() == Some(name)),
                    };
                    let Some(position) = position else {
                        let message = match scope {
                            Some(name) => format!("unmatched 'sourcery:end:{}'", name),
                            None => "unmatched 'sourcery:end'".to_string(),
                        };
                        regions.issues.push(BlockIssue { message, range });
                        continue;
                    };
                    while open.len() > position {
                        let depth = open.len() - 1;
                        if let Some(block) = open.pop() {
                            regions.blocks.push(BlockRegion {
                                scope: block.scope,
                                annotations: block.annotations,
                                range: TextRange::new(block.start, range.start()),
                                depth,
                            });
                        }
                    }
                }
            }
        }

        while let Some(block) = open.pop() {
            let depth = open.len();
            regions.blocks.push(BlockRegion {
                scope: block.scope,
                annotations: block.annotations,
                range: TextRange::new(block.start, file_end.max(block.start)),
                depth,
            });
        }

        regions.blocks.sort_by_key(|b| (b.range.start(), b.depth));
        regions
    }

    /// Block annotations in effect at `offset`, innermost block winning.
    pub fn block_annotations_at(&self, offset: TextSize) -> Annotations {
        let mut containing: Vec<&BlockRegion> = self
            .blocks
            .iter()
            .filter(|b| b.range.contains_inclusive(offset))
            .collect();
        containing.sort_by(|a, b| b.depth.cmp(&a.depth));

        let mut merged = Annotations::new();
        for block in containing {
            merged.fill_from(&block.annotations);
        }
        merged
    }
}
