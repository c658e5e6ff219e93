use serde_json::Value;

/// Descends a fixed chain of keys in an upstream envelope and returns the
/// terminal list. Any missing key yields an empty vec. The Senate API
/// collapses single-element lists into a lone object, so a terminal object
/// is wrapped into a one-element vec.
pub fn unwrap_envelope(data: &Value, path: &[&str]) -> Vec<Value> {
    let mut current = data;
    for key in path {
        match current.get(key) {
            Some(value) => current = value,
            None => return Vec::new(),
        }
    }

    match current {
        Value::Array(items) => items.clone(),
        Value::Object(_) => vec![current.clone()],
        _ => Vec::new(),
    }
}

/// Lazy iterator over every string stored under `key` at any depth of a JSON
/// value. Objects and arrays are traversed in document order; a matching key
/// holding a non-string value is descended into rather than yielded.
pub fn find_key_strings<'a>(root: &'a Value, key: &'a str) -> KeyStrings<'a> {
    KeyStrings {
        key,
        stack: vec![Node::Scan(root)],
    }
}

enum Node<'a> {
    Scan(&'a Value),
    Hit(&'a str),
}

pub struct KeyStrings<'a> {
    key: &'a str,
    stack: Vec<Node<'a>>,
}

impl<'a> Iterator for KeyStrings<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Hit(s) => return Some(s),
                Node::Scan(Value::Object(map)) => {
                    // Reverse push keeps document order on the stack.
                    for (k, v) in map.iter().rev() {
                        if k == self.key {
                            match v {
                                Value::String(s) => self.stack.push(Node::Hit(s)),
                                other => self.stack.push(Node::Scan(other)),
                            }
                        } else {
                            self.stack.push(Node::Scan(v));
                        }
                    }
                }
                Node::Scan(Value::Array(items)) => {
                    for item in items.iter().rev() {
                        self.stack.push(Node::Scan(item));
                    }
                }
                Node::Scan(_) => {}
            }
        }
        None
    }
}
