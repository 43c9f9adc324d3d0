//! Chart.js 绑定
//!
//! Chart.js 由 index.html 通过 CDN 引入，这里只声明用到的构造函数和 `destroy`。

use crate::serde_helper;
use leptos::prelude::*;
use tm_portal::dashboard::ChartConfig;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
extern "C" {
    type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &Chart);
}

/// 配置变化时销毁旧图表再重建，卸载时销毁
#[component]
pub fn ChartCanvas(#[prop(into)] config: Signal<Option<ChartConfig>>) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let chart = StoredValue::new_local(None::<Chart>);

    Effect::new(move |_| {
        let config = config.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        chart.update_value(|current| {
            if let Some(old) = current.take() {
                old.destroy();
            }
        });
        let Some(config) = config else {
            return;
        };
        let created = serde_helper::to_value(&config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|js| Chart::new(&canvas, &js));
        match created {
            Ok(created) => chart.set_value(Some(created)),
            Err(e) => log::error!("chart ({}) failed: {:?}", config.kind, e),
        }
    });

    on_cleanup(move || {
        chart.try_update_value(|current| {
            if let Some(old) = current.take() {
                old.destroy();
            }
        });
    });

    view! {
        <div class="relative h-72">
            <canvas node_ref=canvas_ref></canvas>
        </div>
    }
}
