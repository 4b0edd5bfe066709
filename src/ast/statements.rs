use crate::ast::{BoolExpr, ColumnExpr, ValueExpr};

/// Operation tree node.
///
/// Built once by the parser, executed once against a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Child operations applied in order
    ///
    /// # Example
    /// ```text
    /// filter h.a eq .b into table h.c
    /// ```
    Compound(Vec<Operation>),

    /// Keeps the records the condition holds for
    ///
    /// # Example
    /// ```text
    /// filter h.numberrange eq .4
    /// ```
    Filter(BoolExpr),

    /// Projects every record into a table row
    ///
    /// # Example
    /// ```text
    /// into table h.name f.year[h.date]
    /// ```
    Table(Vec<ColumnExpr>),

    /// Buckets records by the values of its columns
    ///
    /// # Example
    /// ```text
    /// into summary h.numberrange
    /// ```
    Group(Vec<ColumnExpr>),

    /// Orders records by successive keys
    ///
    /// # Example
    /// ```text
    /// sort c.year c.month
    /// ```
    Sort(Vec<ValueExpr>),
}

impl Operation {
    /// Collapse a single-child compound into its child and inline nested
    /// compounds into their parent, preserving order.
    pub fn simplify(self) -> Operation {
        match self {
            Operation::Compound(children) => {
                let mut flat = Vec::with_capacity(children.len());
                for child in children {
                    match child.simplify() {
                        Operation::Compound(grandchildren) => flat.extend(grandchildren),
                        op => flat.push(op),
                    }
                }
                if flat.len() == 1 {
                    flat.pop().unwrap_or(Operation::Compound(Vec::new()))
                } else {
                    Operation::Compound(flat)
                }
            }
            op => op,
        }
    }
}

#[test]
fn test_simplify_flattens_and_collapses() {
    let sort = Operation::Sort(vec![ValueExpr::field("c.a")]);
    let table = Operation::Table(vec![ColumnExpr::new("a", ValueExpr::field("h.a"))]);

    let nested = Operation::Compound(vec![
        Operation::Compound(vec![table.clone()]),
        Operation::Compound(vec![sort.clone(), Operation::Compound(vec![])]),
    ]);
    assert_eq!(
        nested.simplify(),
        Operation::Compound(vec![table.clone(), sort])
    );

    let single = Operation::Compound(vec![Operation::Compound(vec![table.clone()])]);
    assert_eq!(single.simplify(), table);
}
