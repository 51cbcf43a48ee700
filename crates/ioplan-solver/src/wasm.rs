//! WASM bindings for ioplan
//!
//! JavaScript-friendly wrappers used by the browser front-end. Problems and
//! results cross the boundary as plain objects via `serde-wasm-bindgen`.

use wasm_bindgen::prelude::*;

use crate::method::Method;
use crate::problem::{ProblemKind, ProblemModel};
use crate::session::SolverSession;
use crate::solver::{SolveError, Solver};

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_model(problem: JsValue) -> Result<ProblemModel, JsValue> {
    serde_wasm_bindgen::from_value(problem).map_err(to_js)
}

/// Solve a problem object with the named method and return the full result
#[wasm_bindgen]
pub fn solve(problem: JsValue, method: &str) -> Result<JsValue, JsValue> {
    let model = parse_model(problem)?;
    let method: Method = method.parse().map_err(to_js)?;
    let result = Solver::new().solve(&model, method).map_err(to_js)?;
    serde_wasm_bindgen::to_value(&result).map_err(to_js)
}

/// Balance a problem object; returns `{ model, outcome }`
#[wasm_bindgen]
pub fn balance(problem: JsValue) -> Result<JsValue, JsValue> {
    let model = parse_model(problem)?;
    let balanced = Solver::new().balance(&model);
    let out = BalanceResult {
        message: balanced.outcome.message(),
        balanced: balanced.outcome.is_balanced(),
        model: balanced.model,
    };
    serde_wasm_bindgen::to_value(&out).map_err(to_js)
}

/// Built-in example problem for `transportation` or `assignment`
#[wasm_bindgen]
pub fn example(kind: &str) -> Result<JsValue, JsValue> {
    let kind: ProblemKind = kind.parse().map_err(to_js)?;
    serde_wasm_bindgen::to_value(&ProblemModel::example(kind)).map_err(to_js)
}

#[derive(serde::Serialize)]
struct BalanceResult {
    message: &'static str,
    balanced: bool,
    model: ProblemModel,
}

/// Stateful session for stepwise presentation in the browser
#[wasm_bindgen]
pub struct WasmSession {
    inner: SolverSession,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(problem: JsValue) -> Result<WasmSession, JsValue> {
        Ok(Self {
            inner: SolverSession::new(parse_model(problem)?),
        })
    }

    #[wasm_bindgen(js_name = setMethod)]
    pub fn set_method(&mut self, method: &str) -> Result<(), JsValue> {
        let method: Method = method.parse().map_err(to_js)?;
        self.inner.set_method(method);
        Ok(())
    }

    #[wasm_bindgen(js_name = setProblem)]
    pub fn set_problem(&mut self, problem: JsValue) -> Result<(), JsValue> {
        self.inner.set_model(parse_model(problem)?);
        Ok(())
    }

    /// Current model, including any fictitious row or column
    pub fn problem(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.model()).map_err(to_js)
    }

    /// Returns the balancer's message
    pub fn balance(&mut self) -> String {
        self.inner.balance().message().to_string()
    }

    #[wasm_bindgen(js_name = solveAll)]
    pub fn solve_all(&mut self) -> Result<JsValue, JsValue> {
        let kind = self.inner.model().kind();
        let result = self.inner.solve_all().map_err(to_js)?;
        let out = SolveOutput {
            insight: result.insight(kind),
            result,
        };
        serde_wasm_bindgen::to_value(&out).map_err(to_js)
    }

    /// Next step, or `null` once every step has been shown
    pub fn step(&mut self) -> Result<JsValue, JsValue> {
        match self.inner.step() {
            Ok(step) => serde_wasm_bindgen::to_value(step).map_err(to_js),
            Err(SolveError::StepsExhausted) => Ok(JsValue::NULL),
            Err(e) => Err(to_js(e)),
        }
    }

    pub fn rewind(&mut self) -> bool {
        self.inner.rewind()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

#[derive(serde::Serialize)]
struct SolveOutput<'a> {
    result: &'a crate::solution::SolveResult,
    insight: String,
}
