use crate::{object::Object, value::Variant};

/// Read-only access to the content of a [`Variant`], one method per kind.
///
/// [`Variant::visit`] makes exactly one call per invocation, handing the
/// stored payload over by shared reference. Array and Object arrive as
/// whole aggregates; recursing into their elements is the visitor's own
/// responsibility. No allocation happens on the dispatch path.
pub trait Visitor {
    fn visit_null(&mut self);
    fn visit_int64(&mut self, value: i64);
    fn visit_uint64(&mut self, value: u64);
    fn visit_double(&mut self, value: f64);
    fn visit_bool(&mut self, value: bool);
    fn visit_string(&mut self, value: &str);
    fn visit_array(&mut self, items: &[Variant]);
    fn visit_object(&mut self, object: &Object);
}

impl Variant {
    /// Dispatches on the stored kind, invoking the matching visitor method.
    pub fn visit<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Variant::Null => visitor.visit_null(),
            Variant::Int64(value) => visitor.visit_int64(*value),
            Variant::UInt64(value) => visitor.visit_uint64(*value),
            Variant::Double(value) => visitor.visit_double(*value),
            Variant::Bool(value) => visitor.visit_bool(*value),
            Variant::String(value) => visitor.visit_string(value),
            Variant::Array(items) => visitor.visit_array(items),
            Variant::Object(object) => visitor.visit_object(object),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Visitor;
    use crate::{object::Object, value::Variant};

    /// Renders a debug-ish outline by recursing through aggregates.
    #[derive(Default)]
    struct Outline {
        out: String,
    }

    impl Visitor for Outline {
        fn visit_null(&mut self) {
            self.out.push_str("null");
        }

        fn visit_int64(&mut self, value: i64) {
            self.out.push_str(&value.to_string());
        }

        fn visit_uint64(&mut self, value: u64) {
            self.out.push_str(&value.to_string());
        }

        fn visit_double(&mut self, value: f64) {
            self.out.push_str(&value.to_string());
        }

        fn visit_bool(&mut self, value: bool) {
            self.out.push_str(if value { "true" } else { "false" });
        }

        fn visit_string(&mut self, value: &str) {
            self.out.push('"');
            self.out.push_str(value);
            self.out.push('"');
        }

        fn visit_array(&mut self, items: &[Variant]) {
            self.out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    self.out.push(',');
                }
                item.visit(self);
            }
            self.out.push(']');
        }

        fn visit_object(&mut self, object: &Object) {
            let mut entries: Vec<_> = object.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            self.out.push('{');
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    self.out.push(',');
                }
                self.out.push_str(key);
                self.out.push('=');
                value.visit(self);
            }
            self.out.push('}');
        }
    }

    fn outline(value: &Variant) -> String {
        let mut visitor = Outline::default();
        value.visit(&mut visitor);
        visitor.out
    }

    #[test]
    fn dispatches_on_every_kind() {
        assert_eq!(outline(&Variant::Null), "null");
        assert_eq!(outline(&Variant::from(-7)), "-7");
        assert_eq!(outline(&Variant::from(7u64)), "7");
        assert_eq!(outline(&Variant::from(0.5)), "0.5");
        assert_eq!(outline(&Variant::from(true)), "true");
        assert_eq!(outline(&Variant::from("hi")), "\"hi\"");
    }

    #[test]
    fn aggregates_are_delivered_whole() {
        let mut object = Object::new();
        object.insert("a", 1);
        object.insert("b", Variant::Array(vec![Variant::Null, Variant::from(false)]));
        let value: Variant = object.into();
        assert_eq!(outline(&value), "{a=1,b=[null,false]}");
    }
}
