//! Layout ordering over direct (by-value) struct embeddings
//!
//! A C++ struct can only hold another struct by value once that struct is
//! complete, so a struct's layout must follow the layouts of every struct it
//! embeds directly. Variable arrays (`std::vector<T>`) accept incomplete
//! element types and are not embeddings.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{SchemaDocument, StructDef};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Order the non-external structs for layout emission
///
/// Declaration order is kept except where a struct must be moved after the
/// structs it embeds. A cycle of direct embeddings, including a struct
/// embedding itself, has no valid order and is rejected.
pub fn layout_order(doc: &SchemaDocument) -> SchemaResult<Vec<&StructDef>> {
    let locals: Vec<&StructDef> = doc.local_structs().collect();
    let index: HashMap<&str, usize> = locals
        .iter()
        .enumerate()
        .map(|(i, s)| (s.name.as_str(), i))
        .collect();

    let mut walk = Walk {
        locals: &locals,
        index: &index,
        marks: vec![Mark::Unvisited; locals.len()],
        path: Vec::new(),
        order: Vec::with_capacity(locals.len()),
    };

    for root in 0..locals.len() {
        if walk.marks[root] == Mark::Unvisited {
            walk.visit(root)?;
        }
    }

    debug!(
        order = ?walk.order.iter().map(|&i| locals[i].name.as_str()).collect::<Vec<_>>(),
        "Resolved struct layout order"
    );

    Ok(walk.order.into_iter().map(|i| locals[i]).collect())
}

struct Walk<'a, 'd> {
    locals: &'a [&'d StructDef],
    index: &'a HashMap<&'d str, usize>,
    marks: Vec<Mark>,
    path: Vec<usize>,
    order: Vec<usize>,
}

impl Walk<'_, '_> {
    fn visit(&mut self, node: usize) -> SchemaResult<()> {
        self.marks[node] = Mark::InProgress;
        self.path.push(node);

        let locals = self.locals;
        for field in &locals[node].fields {
            let Some(target) = field.ty.embedded_struct() else {
                continue;
            };
            // Structs laid out elsewhere impose no order here
            let Some(&target) = self.index.get(target) else {
                continue;
            };

            match self.marks[target] {
                Mark::Done => {}
                Mark::Unvisited => self.visit(target)?,
                Mark::InProgress => return Err(self.cycle_error(target)),
            }
        }

        self.path.pop();
        self.marks[node] = Mark::Done;
        self.order.push(node);
        Ok(())
    }

    fn cycle_error(&self, target: usize) -> SchemaError {
        let start = self
            .path
            .iter()
            .position(|&n| n == target)
            .unwrap_or_default();

        let mut path: Vec<String> = self.path[start..]
            .iter()
            .map(|&n| self.locals[n].name.clone())
            .collect();
        path.push(self.locals[target].name.clone());

        SchemaError::DirectEmbeddingCycle { path }
    }
}
