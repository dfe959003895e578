//! Extraction context: tracks file, scope and annotation regions during extraction.

use std::sync::Arc;

use crate::annotations::{Annotations, FileRegions};
use crate::base::constants::NAME_SEPARATOR;
use crate::base::{LineIndex, TextRange};

use super::types::{AccessLevel, DeclKind, SourceLocation};

/// What a member or nested declaration inherits from its enclosing declaration.
#[derive(Debug, Clone)]
pub(super) struct Container {
    pub kind: DeclKind,
    /// Effective annotations of the container
    pub annotations: Annotations,
    /// Access applied to members without their own access modifier
    pub default_access: Option<AccessLevel>,
    /// Generic parameter names declared by the container
    pub generics: Vec<String>,
}

/// Extraction state passed through all extraction functions.
pub(super) struct ExtractionContext<'a> {
    pub file: Arc<str>,
    pub line_index: &'a LineIndex,
    pub regions: FileRegions,
    pub parse_documentation: bool,
    /// Qualified name of the innermost enclosing declaration
    pub prefix: String,
    /// Stack of scope segments for proper push/pop
    pub scope_stack: Vec<String>,
    pub containers: Vec<Container>,
}

impl<'a> ExtractionContext<'a> {
    pub fn new(
        file: Arc<str>,
        line_index: &'a LineIndex,
        regions: FileRegions,
        parse_documentation: bool,
    ) -> Self {
        Self {
            file,
            line_index,
            regions,
            parse_documentation,
            prefix: String::new(),
            scope_stack: Vec::new(),
            containers: Vec::new(),
        }
    }

    pub fn qualified_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}{}{}", self.prefix, NAME_SEPARATOR, name)
        }
    }

    /// Qualified name of the enclosing declaration, if any
    pub fn parent_name(&self) -> Option<String> {
        (!self.prefix.is_empty()).then(|| self.prefix.clone())
    }

    pub fn push_scope(&mut self, name: &str, container: Container) {
        self.scope_stack.push(name.to_string());
        self.prefix = self.qualified_name(name);
        self.containers.push(container);
    }

    pub fn pop_scope(&mut self) {
        if let Some(popped) = self.scope_stack.pop() {
            // Remove the last segment (which may itself be dotted) plus the separator
            let suffix_len = if self.scope_stack.is_empty() {
                popped.len()
            } else {
                popped.len() + NAME_SEPARATOR.len_utf8()
            };
            self.prefix
                .truncate(self.prefix.len().saturating_sub(suffix_len));
        }
        self.containers.pop();
    }

    pub fn container(&self) -> Option<&Container> {
        self.containers.last()
    }

    /// Generic parameter names visible at the current position.
    pub fn generics_in_scope(&self) -> Vec<String> {
        self.containers
            .iter()
            .flat_map(|c| c.generics.iter().cloned())
            .collect()
    }

    pub fn location(&self, range: TextRange) -> SourceLocation {
        SourceLocation {
            file: self.file.clone(),
            range,
        }
    }

    /// Combine direct annotations with the block, container and file levels.
    ///
    /// Everything inside an extension inherits the extension's annotations;
    /// inside an enum only the cases inherit.
    pub fn effective_annotations(
        &self,
        direct: Annotations,
        range: TextRange,
        is_enum_case: bool,
    ) -> Annotations {
        let mut effective = direct;
        effective.fill_from(&self.regions.block_annotations_at(range.start()));
        match self.container() {
            Some(container) if container.kind == DeclKind::Extension => {
                effective.fill_from(&container.annotations)
            }
            Some(container) if container.kind == DeclKind::Enum && is_enum_case => {
                effective.fill_from(&container.annotations)
            }
            _ => {}
        }
        effective.fill_from(&self.regions.file);
        effective
    }

    /// Access for a member: explicit modifier, else container default, else internal.
    pub fn member_access(&self, explicit: Option<AccessLevel>) -> AccessLevel {
        explicit
            .or_else(|| self.container().and_then(|c| c.default_access))
            .unwrap_or_default()
    }
}
