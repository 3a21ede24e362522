use std::collections::HashMap;

use log::{debug, trace};

use loom_core::{
    identifier::Id,
    semantic::{EdgeKind, NodeKind},
};
use loom_parser::{
    checker::INPUT,
    declarations::Declaration,
    syntax::{self, ArrowChain, Call, Statement},
};

use super::Graph;

/// Builds a [`Graph`] from collected declarations.
///
/// Module nodes are created for every module declaration before any pipeline
/// is walked, so calls and arrows resolve modules declared later in the
/// document.
pub struct GraphBuilder<'a> {
    source: &'a str,
    graph: Graph,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            graph: Graph::new(),
        }
    }

    /// Walk `declarations` and return the unpositioned graph.
    pub fn build(mut self, declarations: &[Declaration]) -> Graph {
        for module in declarations.iter().filter(|decl| decl.is_module()) {
            self.add_module(module);
        }
        for pipeline in declarations.iter().filter(|decl| decl.is_pipeline()) {
            self.add_pipeline(pipeline);
        }

        debug!(
            nodes_count = self.graph.node_count(),
            edges_count = self.graph.edge_count();
            "Graph built"
        );
        trace!(graph:? = self.graph; "Built graph");
        self.graph
    }

    fn add_module(&mut self, module: &Declaration) {
        let id = Id::new(module.name());
        self.graph.add_node(id, NodeKind::Module, module.name());

        if module.runtime_block(self.source).is_some() {
            let runtime = id.create_nested(Id::new("runtime"));
            self.graph.add_node(runtime, NodeKind::Runtime, "runtime");
            self.graph.add_edge(id, runtime, EdgeKind::Structural);
        }
    }

    fn add_pipeline(&mut self, pipeline: &Declaration) {
        let body = pipeline.body_text(self.source);
        let mut bindings: HashMap<&str, Id> = HashMap::new();

        for statement in syntax::statements(body) {
            match statement {
                Statement::Call(call) => self.add_call(body, &call, &mut bindings),
                Statement::Arrow(chain) => self.add_arrow_chain(&chain),
            }
        }
    }

    /// Edges into a called module from its `input.*` arguments and from
    /// variables bound earlier in the pipeline.
    fn add_call<'b>(&mut self, body: &'b str, call: &Call<'b>, bindings: &mut HashMap<&'b str, Id>) {
        let module = Id::get(call.module).filter(|id| self.graph.is_module(*id));

        if let Some(args) = call.args {
            for reference in syntax::references(&body[args.range()]) {
                let root = reference.root();
                let source = if root == INPUT {
                    let Some(field) = reference.field() else {
                        continue;
                    };
                    Some(self.add_input(field))
                } else {
                    bindings.get(root).copied()
                };

                if let (Some(source), Some(module)) = (source, module) {
                    self.graph.add_edge(source, module, EdgeKind::DataFlow);
                }
            }
        }

        let Some(binding) = call.binding else {
            return;
        };
        match module {
            Some(module) => {
                debug!(variable = binding.name, module = call.module; "Bound variable to module");
                bindings.insert(binding.name, module);
            }
            None => {
                bindings.remove(binding.name);
            }
        }
    }

    fn add_arrow_chain(&mut self, chain: &ArrowChain<'_>) {
        for (from, to) in chain.links() {
            let source = self.arrow_endpoint(from);
            let target = self.arrow_endpoint(to);
            self.graph.add_edge(source, target, EdgeKind::DataFlow);
        }
    }

    /// Resolve an arrow endpoint to a module, input or inferred node.
    fn arrow_endpoint(&mut self, name: &str) -> Id {
        if let Some(field) = name
            .strip_prefix(INPUT)
            .and_then(|rest| rest.strip_prefix('.'))
        {
            return self.add_input(field);
        }

        let id = Id::new(name);
        if !self.graph.contains_node(id) {
            debug!(name; "Inferred node for undeclared arrow endpoint");
            self.graph.add_node(id, NodeKind::Inferred, name);
        }
        id
    }

    fn add_input(&mut self, field: &str) -> Id {
        let id = Id::new(field);
        self.graph.add_node(id, NodeKind::Input, field);
        id
    }
}
