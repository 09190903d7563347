//! The page: a document plus the custom element instances living in it.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use hostdom::{DispatchOutcome, Document, Element, NodeId, Reaction};

use crate::error::{LifecycleError, LifecycleErrorKind, NavError, extract_panic_message};
use crate::lifecycle::{CustomElement, ElementContext, Hook, run_hook};
use crate::registration::ElementFactory;
use crate::registry::CustomElementRegistry;

struct Instance {
    tag: String,
    element: Box<dyn CustomElement>,
}

/// Owns a [`Document`] and runs custom element hooks for it.
///
/// Every tag in the registry is defined on the document, so the document
/// queues reactions for those elements. Mutating methods on `Page` drain the
/// queue before returning. Code that edits [`Page::document_mut`] directly
/// must call [`Page::flush`] afterwards.
///
/// Hooks that fail or panic are recorded in [`Page::lifecycle_errors`] and
/// draining continues with the next reaction.
pub struct Page {
    document: Document,
    registry: CustomElementRegistry,
    instances: HashMap<NodeId, Instance>,
    errors: Vec<LifecycleError>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("document", &self.document)
            .field("registry", &self.registry)
            .field("instances", &self.instances.len())
            .field("errors", &self.errors)
            .finish()
    }
}

impl Page {
    /// Page using every element registered through inventory.
    pub fn new() -> Self {
        Self::with_registry(CustomElementRegistry::global().clone())
    }

    pub fn with_registry(registry: CustomElementRegistry) -> Self {
        let mut document = Document::new();
        for tag in registry.tags() {
            document.define(tag);
        }
        Self {
            document,
            registry,
            instances: HashMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct document access. Call [`Page::flush`] after structural edits.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn registry(&self) -> &CustomElementRegistry {
        &self.registry
    }

    /// Define another element after construction. Existing elements with
    /// that tag are upgraded.
    pub fn define(&mut self, tag: &str, factory: ElementFactory) -> Result<(), NavError> {
        self.registry.define(tag, factory)?;
        self.document.define(tag);
        self.flush();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Tree edits
    // -------------------------------------------------------------------------

    /// Build `element` and append it to the document root.
    pub fn mount(&mut self, element: Element) -> Result<NodeId, NavError> {
        let root = self.document.root();
        self.mount_into(root, element)
    }

    /// Build `element` and append it to `parent`.
    pub fn mount_into(&mut self, parent: NodeId, element: Element) -> Result<NodeId, NavError> {
        let node = self.document.create(element);
        let result = self.document.append_child(parent, node);
        self.flush();
        result?;
        Ok(node)
    }

    /// Build `element` without inserting it.
    pub fn create(&mut self, element: Element) -> NodeId {
        let node = self.document.create(element);
        self.flush();
        node
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NavError> {
        let result = self.document.append_child(parent, child);
        self.flush();
        Ok(result?)
    }

    /// Detach `node` from its parent.
    pub fn remove(&mut self, node: NodeId) -> Result<(), NavError> {
        let result = self.document.remove(node);
        self.flush();
        Ok(result?)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), NavError> {
        let result = self.document.set_attribute(node, name, value);
        self.flush();
        Ok(result?)
    }

    pub fn remove_attribute(
        &mut self,
        node: NodeId,
        name: &str,
    ) -> Result<Option<String>, NavError> {
        let result = self.document.remove_attribute(node, name);
        self.flush();
        Ok(result?)
    }

    /// Click `node` as a user would.
    pub fn click(&mut self, node: NodeId) -> Result<DispatchOutcome, NavError> {
        let result = self.document.click(node);
        self.flush();
        Ok(result?)
    }

    // -------------------------------------------------------------------------
    // Instances
    // -------------------------------------------------------------------------

    /// The instance attached to `node`, if it is a `T`.
    pub fn instance<T: CustomElement>(&self, node: NodeId) -> Option<&T> {
        let instance = self.instances.get(&node)?;
        instance.element.as_ref().as_any().downcast_ref::<T>()
    }

    /// Run `f` with the instance attached to `node` and the document, then
    /// drain reactions.
    pub fn with_instance<T, R>(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut T, &mut Document) -> R,
    ) -> Option<R>
    where
        T: CustomElement,
    {
        let instance = self.instances.get_mut(&node)?;
        let element = instance.element.as_mut().as_any_mut().downcast_mut::<T>()?;
        let result = f(element, &mut self.document);
        self.flush();
        Some(result)
    }

    /// Nodes with an instance of `T`, in creation order.
    pub fn instances_of<T: CustomElement>(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self
            .instances
            .iter()
            .filter(|(_, instance)| instance.element.as_ref().as_any().is::<T>())
            .map(|(node, _)| *node)
            .collect();
        nodes.sort();
        nodes
    }

    pub fn lifecycle_errors(&self) -> &[LifecycleError] {
        &self.errors
    }

    pub fn take_lifecycle_errors(&mut self) -> Vec<LifecycleError> {
        std::mem::take(&mut self.errors)
    }

    // -------------------------------------------------------------------------
    // Reactions
    // -------------------------------------------------------------------------

    /// Run every queued reaction, including ones queued by hooks.
    pub fn flush(&mut self) {
        while let Some(reaction) = self.document.pop_reaction() {
            self.react(reaction);
        }
    }

    fn react(&mut self, reaction: Reaction) {
        let node = reaction.node();

        if let Reaction::Created(_) = reaction {
            if self.instances.contains_key(&node) {
                log::debug!("{node} already has an instance, ignoring created reaction");
                return;
            }
            let Some(tag) = self.document.tag_name(node).map(str::to_string) else {
                return;
            };
            let Some(factory) = self.registry.get(&tag) else {
                log::warn!("created reaction for undefined <{tag}> at {node}");
                return;
            };
            self.instances.insert(
                node,
                Instance {
                    tag,
                    element: factory(),
                },
            );
        }

        let Some(instance) = self.instances.get_mut(&node) else {
            log::trace!("no instance for {node}, dropping {:?}", Hook::from(&reaction));
            return;
        };

        let hook = Hook::from(&reaction);
        let mut cx = ElementContext {
            document: &mut self.document,
            host: node,
            tag: &instance.tag,
        };
        let element = instance.element.as_mut();
        let result =
            panic::catch_unwind(AssertUnwindSafe(|| run_hook(element, &mut cx, &reaction)));

        let kind = match result {
            Ok(Ok(())) => return,
            Ok(Err(err)) => LifecycleErrorKind::Failed(err),
            Err(panic) => LifecycleErrorKind::Panic {
                message: extract_panic_message(panic.as_ref()),
            },
        };
        let error = LifecycleError {
            tag: instance.tag.clone(),
            node,
            hook,
            kind,
        };
        log::error!("{error}");
        self.errors.push(error);
    }
}
