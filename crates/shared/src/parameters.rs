use evalexpr::{build_operator_tree, ContextWithMutableVariables, HashMapContext, Value};

/// Результат вычисления числового поля
pub type ParameterResult = Result<f64, ParameterError>;

/// Ошибки при вычислении числового поля
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Пустой ввод
    Empty,
    /// Ошибка парсинга формулы
    ParseError(String),
    /// Ошибка вычисления формулы
    EvaluationError(String),
    /// Неверный тип значения
    InvalidType(String),
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterError::Empty => write!(f, "Empty input"),
            ParameterError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ParameterError::EvaluationError(msg) => write!(f, "Evaluation error: {}", msg),
            ParameterError::InvalidType(msg) => write!(f, "Invalid type: {}", msg),
        }
    }
}

impl std::error::Error for ParameterError {}

/// Вычислить значение числового поля: число или арифметическое выражение ("2*0.25", "PI/4")
pub fn evaluate_number(input: &str) -> ParameterResult {
    let expression = input.trim();
    if expression.is_empty() {
        return Err(ParameterError::Empty);
    }

    let mut context = HashMapContext::new();

    // Математические константы
    context
        .set_value("PI".to_string(), Value::Float(std::f64::consts::PI))
        .ok();
    context
        .set_value("E".to_string(), Value::Float(std::f64::consts::E))
        .ok();

    let tree =
        build_operator_tree(expression).map_err(|e| ParameterError::ParseError(e.to_string()))?;

    let value = tree
        .eval_with_context(&context)
        .map_err(|e| ParameterError::EvaluationError(e.to_string()))?;

    match value {
        Value::Float(f) if f.is_finite() => Ok(f),
        Value::Float(f) => Err(ParameterError::EvaluationError(format!(
            "Result is not finite: {}",
            f
        ))),
        Value::Int(i) => Ok(i as f64),
        _ => Err(ParameterError::InvalidType(format!(
            "Expected number, got {:?}",
            value
        ))),
    }
}
