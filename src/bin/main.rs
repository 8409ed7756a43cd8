//! Card Flow 演示程序
//!
//! 用法：card-flow-demo [config.json] [output.png]
//!
//! 用一个纯色卡片数据源跑一段脚本化的交互（居中、拖动、吸附、点击），
//! 打印每一步的状态，最后把画面导出为 PNG。

use card_flow::{
    CardFlow, CardFlowError, Configuration, DataSource, EventLog, Point, PositionedCard, Rect, RenderSurface,
};
use image::{Rgba, RgbaImage};
use std::cell::RefCell;
use std::rc::Rc;

const CARD_COUNT: usize = 12;
const FRAME_DT: f32 = 1.0 / 60.0;

/// 纯色卡片
#[derive(Debug, Clone, Copy)]
struct ColorCard {
    color: [u8; 3],
}

/// 按色相轮生成卡片，并统计取卡次数
struct PaletteSource {
    count: usize,
    fetched: usize,
}

impl DataSource for PaletteSource {
    type Card = ColorCard;

    fn number_of_cards(&self) -> usize {
        self.count
    }

    fn card_at_index(&mut self, index: usize) -> Option<ColorCard> {
        if index >= self.count {
            return None;
        }
        self.fetched += 1;
        let hue = index as f32 / self.count as f32;
        Some(ColorCard { color: hue_to_rgb(hue) })
    }
}

fn hue_to_rgb(hue: f32) -> [u8; 3] {
    let h = hue.fract() * 6.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]
}

/// 把最近一帧光栅化到 RGBA 画布
struct ImageSurface {
    image: Rc<RefCell<RgbaImage>>,
}

impl RenderSurface<ColorCard> for ImageSurface {
    fn present(&mut self, cards: &[PositionedCard<'_, ColorCard>]) {
        let mut image = self.image.borrow_mut();
        for pixel in image.pixels_mut() {
            *pixel = Rgba([245, 245, 245, 255]);
        }
        let bounds = Rect::new(0.0, 0.0, image.width() as f32, image.height() as f32);
        for card in cards {
            if card.transform.frame.intersects(&bounds) {
                fill_rect(&mut image, &card.transform.frame, card.card.color, card.transform.opacity);
            }
        }
    }
}

fn fill_rect(image: &mut RgbaImage, rect: &Rect, color: [u8; 3], opacity: f32) {
    let x0 = rect.left().max(0.0) as u32;
    let y0 = rect.top().max(0.0) as u32;
    let x1 = (rect.right().max(0.0) as u32).min(image.width());
    let y1 = (rect.bottom().max(0.0) as u32).min(image.height());
    let alpha = opacity.clamp(0.0, 1.0);

    for y in y0..y1 {
        for x in x0..x1 {
            let dst = image.get_pixel_mut(x, y);
            for channel in 0..3 {
                let blended = color[channel] as f32 * alpha + dst.0[channel] as f32 * (1.0 - alpha);
                dst.0[channel] = blended as u8;
            }
        }
    }
}

fn print_state(step: &str, flow: &CardFlow<PaletteSource>) {
    let state = serde_json::to_string(&flow.state()).unwrap_or_default();
    let visible: Vec<usize> = flow.frame().iter().map(|(index, _)| *index).collect();
    println!("[{}] {} visible={:?} cached={:?}", step, state, visible, flow.cached_indices());
}

/// 推进动画直到结束，返回帧数
fn settle(flow: &mut CardFlow<PaletteSource>) -> Result<usize, CardFlowError> {
    let mut frames = 0;
    while flow.tick(FRAME_DT)? {
        frames += 1;
    }
    Ok(frames)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("🃏 Card Flow demo");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            println!("Loading configuration from {}", path);
            Configuration::from_json_file(&path)?
        }
        None => Configuration::default(),
    };
    let output = args.next().unwrap_or_else(|| "card_flow.png".to_string());

    let image = Rc::new(RefCell::new(RgbaImage::new(
        config.viewport.width as u32,
        config.viewport.height as u32,
    )));
    let events = EventLog::new();
    let mut flow = CardFlow::new(PaletteSource { count: CARD_COUNT, fetched: 0 }, config)?
        .with_delegate(events.clone())
        .with_render_surface(ImageSurface { image: image.clone() });

    flow.reload_data()?;
    print_state("reload", &flow);

    // 直接跳到第 3 张
    flow.center_on_card_at_interval(3, false)?;
    print_state("center +3", &flow);

    // 向左拖 2.5 张后松手，吸附到第 6 张
    let spacing = flow.card_spacing();
    flow.pan_begin(Point::new(200.0, 240.0))?;
    for _ in 0..5 {
        flow.pan_move(-spacing / 2.0)?;
    }
    print_state("drag", &flow);
    flow.pan_end(Some(-300.0))?;
    let frames = settle(&mut flow)?;
    print_state(&format!("snap ({} frames)", frames), &flow);

    // 动画回退两张，中途再用手势打断
    flow.center_on_card_at_interval(-2, true)?;
    flow.tick(0.1)?;
    flow.pan_begin(Point::new(160.0, 240.0))?;
    flow.pan_move(spacing * 0.3)?;
    flow.pan_end(None)?;
    settle(&mut flow)?;
    print_state("interrupted", &flow);

    // 点击视口中心
    let center = Point::new(flow.configuration().viewport.width / 2.0, flow.configuration().viewport.height / 2.0);
    if let Some(index) = flow.tap(center) {
        println!("Tapped card {}", index);
    }

    println!("Events: {}", serde_json::to_string(&events.events())?);
    println!("Cards fetched from data source: {}", flow.data_source().fetched);

    image.borrow().save(&output)?;
    println!("✅ Final frame rendered to {}", output);
    Ok(())
}
