use std::collections::{HashMap, HashSet};

use super::resources::Resource;
use super::types::TypeDef;
use super::{Schema, is_builtin_type};
use crate::error::BuildError;

/// Accumulates types and resources, then validates them as a whole.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    name: String,
    comment: Option<String>,
    version: Option<i32>,
    base: Option<String>,
    external_types: Vec<String>,
    types: Vec<TypeDef>,
    resources: Vec<Resource>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Types defined outside this schema that may still be referenced.
    pub fn external_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external_types.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn add_type(&mut self, def: TypeDef) {
        self.types.push(def);
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Validate the accumulated schema and return it.
    ///
    /// Fails on duplicate or built-in-shadowing type names, references to
    /// undefined types, and duplicate (method, path) resources. Types are
    /// reordered so that user types precede the types that reference them;
    /// otherwise registration order is kept.
    pub fn build_paranoid(self) -> Result<Schema, BuildError> {
        let order = {
            let mut index: HashMap<&str, usize> = HashMap::new();
            for (i, def) in self.types.iter().enumerate() {
                let name = def.name();
                if is_builtin_type(name) {
                    return Err(BuildError::ReservedTypeName(name.to_string()));
                }
                if index.insert(name, i).is_some() {
                    return Err(BuildError::DuplicateType(name.to_string()));
                }
            }

            let known = |name: &str| {
                is_builtin_type(name)
                    || index.contains_key(name)
                    || self.external_types.iter().any(|e| e == name)
            };

            for def in &self.types {
                if let Some(missing) = def.references().into_iter().find(|&r| !known(r)) {
                    return Err(BuildError::UndefinedType {
                        name: missing.to_string(),
                        context: format!("type {}", def.name()),
                    });
                }
            }

            let mut routes = HashSet::new();
            for resource in &self.resources {
                if let Some(missing) = resource.references().into_iter().find(|&r| !known(r)) {
                    return Err(BuildError::UndefinedType {
                        name: missing.to_string(),
                        context: format!(
                            "resource {} {}",
                            resource.method.as_str(),
                            resource.path
                        ),
                    });
                }
                if !routes.insert((resource.method, resource.path.as_str())) {
                    return Err(BuildError::DuplicateResource {
                        method: resource.method.as_str().to_string(),
                        path: resource.path.clone(),
                    });
                }
            }

            dependency_order(&self.types, &index)
        };

        let mut slots: Vec<Option<TypeDef>> = self.types.into_iter().map(Some).collect();
        let types = order.into_iter().filter_map(|i| slots[i].take()).collect();

        Ok(Schema {
            name: self.name,
            comment: self.comment,
            version: self.version,
            base: self.base,
            types,
            resources: self.resources,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Depth-first post-order over type references, starting from each type in
/// registration order. Cycles are broken where they are first entered.
fn dependency_order(types: &[TypeDef], index: &HashMap<&str, usize>) -> Vec<usize> {
    fn visit(
        i: usize,
        types: &[TypeDef],
        index: &HashMap<&str, usize>,
        marks: &mut [Mark],
        order: &mut Vec<usize>,
    ) {
        if marks[i] != Mark::Unvisited {
            return;
        }
        marks[i] = Mark::Visiting;
        for dep in types[i].references() {
            if let Some(&j) = index.get(dep) {
                visit(j, types, index, marks, order);
            }
        }
        marks[i] = Mark::Done;
        order.push(i);
    }

    let mut marks = vec![Mark::Unvisited; types.len()];
    let mut order = Vec::with_capacity(types.len());
    for i in 0..types.len() {
        visit(i, types, index, &mut marks, &mut order);
    }
    order
}
