use serde_json::{json, Map, Value};

/// Description of one tool, rendered as a JSON schema for callers.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ToolParam>,
    pub required: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct ToolParam {
    pub name: &'static str,
    pub description: &'static str,
    pub param_type: &'static str,
    /// For array types, the item schema.
    pub items: Option<Value>,
    /// Allowed values for string parameters.
    pub enum_values: Option<&'static [&'static str]>,
}

impl ToolParam {
    /// Create a simple parameter.
    pub const fn simple(
        name: &'static str,
        description: &'static str,
        param_type: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            param_type,
            items: None,
            enum_values: None,
        }
    }

    /// Create a string parameter restricted to `values`.
    pub const fn one_of(
        name: &'static str,
        description: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            description,
            param_type: "string",
            items: None,
            enum_values: Some(values),
        }
    }

    /// Create an array parameter with an item schema.
    pub fn array(name: &'static str, description: &'static str, items: Value) -> Self {
        Self {
            name,
            description,
            param_type: "array",
            items: Some(items),
            enum_values: None,
        }
    }

    fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.param_type));
        schema.insert("description".into(), json!(self.description));
        if let Some(items) = &self.items {
            schema.insert("items".into(), items.clone());
        }
        if let Some(values) = self.enum_values {
            schema.insert("enum".into(), json!(values));
        }
        Value::Object(schema)
    }
}

impl ToolDefinition {
    /// Function-calling schema: name, description and an object schema of
    /// the parameters.
    pub fn schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|param| (param.name.to_string(), param.schema()))
            .collect();
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": self.required,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_object_schema() {
        let def = ToolDefinition {
            name: "grep",
            description: "Search files.",
            params: vec![
                ToolParam::simple("pattern", "Regex.", "string"),
                ToolParam::one_of("mode", "Mode.", &["a", "b"]),
                ToolParam::array("items", "Items.", json!({"type": "string"})),
            ],
            required: vec!["pattern"],
        };
        let schema = def.schema();
        assert_eq!(schema["name"], "grep");
        assert_eq!(schema["parameters"]["required"], json!(["pattern"]));
        assert_eq!(
            schema["parameters"]["properties"]["pattern"]["type"],
            "string"
        );
        assert_eq!(
            schema["parameters"]["properties"]["mode"]["enum"],
            json!(["a", "b"])
        );
        assert_eq!(
            schema["parameters"]["properties"]["items"]["items"]["type"],
            "string"
        );
    }
}
