//! Stateless projection of outcomes into HTML fragments or terminal text.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::dispatcher::{CommandKind, Outcome};
use crate::share_link::ShareLinkKind;
use crate::{entities, AppError};

pub const DRAW_TITLE: &str = "🎊 あなたのおせちセット 🎊";
pub const SHARED_TITLE: &str = "🎍 シェアされたおせちセット 🎍";
pub const MY_DISHES_TITLE: &str = "あなたの投稿";

pub const MSG_ADDED: &str = "✅ プールに追加しました！";
pub const MSG_EMPTY_POOL: &str = "まだ料理が登録されていません。先に料理を追加してください。";
pub const MSG_NO_DISHES: &str = "まだ料理が登録されていません。";
pub const MSG_NO_MY_DISHES: &str = "まだ投稿した料理がありません。";
pub const MSG_DELETED: &str = "🗑️ 削除しました。";
pub const MSG_DELETE_CANCELLED: &str = "削除をキャンセルしました。";
pub const MSG_NO_SHARED_CONTENT: &str = "共有された内容が見つかりません。";
pub const MSG_DELETE_PROMPT: &str = "本当に削除しますか？";

pub fn export_file_name(app_name: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}.png", app_name, now.timestamp_millis())
}

/// Name and origin of anything that is displayed as a dish.
pub trait DishView {
    fn name(&self) -> &str;
    fn origin(&self) -> &str;
}

impl DishView for entities::DishEntry {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn origin(&self) -> &str {
        self.origin.as_str()
    }
}

impl DishView for entities::SharedDish {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> &str {
        &self.origin
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn message_html(class: &str, message: &str) -> String {
    format!(r#"<p class="{}">{}</p>"#, class, escape_html(message))
}

pub fn dishes_html<T: DishView>(title: &str, dishes: &[T]) -> String {
    let mut html = format!(
        r#"<h3 style="margin-bottom: 15px; color: #667eea;">{}</h3>"#,
        escape_html(title)
    );
    for (index, dish) in dishes.iter().enumerate() {
        let _ = write!(
            html,
            r#"
            <div class="dish-item" style="animation-delay: {:.1}s">
                <h3>{}</h3>
                <p>{}</p>
            </div>
        "#,
            index as f64 * 0.1,
            escape_html(dish.name()),
            escape_html(dish.origin())
        );
    }
    html
}

fn my_dishes_html(dishes: &[entities::DishEntry]) -> String {
    let mut html = format!(
        r#"<h3 style="margin-bottom: 15px; color: #667eea;">{}</h3>"#,
        escape_html(MY_DISHES_TITLE)
    );
    for dish in dishes {
        let _ = write!(
            html,
            r#"
            <div class="dish-item">
                <h3>{}</h3>
                <p>{}</p>
                <button type="button" class="delete-btn" data-dish-id="{}">削除</button>
            </div>
        "#,
            escape_html(dish.name.as_str()),
            escape_html(dish.origin.as_str()),
            escape_html(dish.id.as_str())
        );
    }
    html
}

pub fn render_html(outcome: &Outcome, app_name: &str, now: DateTime<Utc>) -> String {
    match outcome {
        Outcome::DishAdded(_) => message_html("success-message", MSG_ADDED),
        Outcome::Drawn(draw) => {
            let mut html = dishes_html(DRAW_TITLE, &draw.dishes);
            let _ = write!(
                html,
                r#"
            <a class="save-image-btn" download="{}">📸 画像で保存</a>
        "#,
                escape_html(&export_file_name(app_name, now))
            );
            html
        }
        Outcome::Shared(link) => format!(
            r#"<input class="share-url" readonly value="{}">"#,
            escape_html(&link.url)
        ),
        Outcome::AllDishes(dishes) if dishes.is_empty() => {
            message_html("empty-message", MSG_NO_DISHES)
        }
        Outcome::AllDishes(dishes) => dishes_html(&format!("全 {} 品", dishes.len()), dishes),
        Outcome::MyDishes(dishes) if dishes.is_empty() => {
            message_html("empty-message", MSG_NO_MY_DISHES)
        }
        Outcome::MyDishes(dishes) => my_dishes_html(dishes),
        Outcome::Deleted(_) => message_html("success-message", MSG_DELETED),
        Outcome::DeletionCancelled => message_html("info-message", MSG_DELETE_CANCELLED),
        Outcome::SharedView(view) => dishes_html(SHARED_TITLE, &view.dishes),
        Outcome::NoSharedView => String::new(),
    }
}

fn dishes_text<T: DishView>(title: &str, dishes: &[T]) -> String {
    let mut text = format!("{}\n", title);
    for (index, dish) in dishes.iter().enumerate() {
        let _ = writeln!(text, "{:>2}. {} ― {}", index + 1, dish.name(), dish.origin());
    }
    text
}

pub fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::DishAdded(entry) => format!("{} (id: {})\n", MSG_ADDED, entry.id),
        Outcome::Drawn(draw) => dishes_text(DRAW_TITLE, &draw.dishes),
        Outcome::Shared(link) => match &link.kind {
            ShareLinkKind::Snapshot(_) => format!("🔗 {}\n", link.url),
            ShareLinkKind::Inline => format!("🔗 {} (オフライン共有)\n", link.url),
        },
        Outcome::AllDishes(dishes) if dishes.is_empty() => format!("{}\n", MSG_NO_DISHES),
        Outcome::AllDishes(dishes) => dishes_text(&format!("全 {} 品", dishes.len()), dishes),
        Outcome::MyDishes(dishes) if dishes.is_empty() => format!("{}\n", MSG_NO_MY_DISHES),
        Outcome::MyDishes(dishes) => {
            let mut text = format!("{}\n", MY_DISHES_TITLE);
            for dish in dishes {
                let _ = writeln!(text, "[{}] {} ― {}", dish.id, dish.name, dish.origin);
            }
            text
        }
        Outcome::Deleted(_) => format!("{}\n", MSG_DELETED),
        Outcome::DeletionCancelled => format!("{}\n", MSG_DELETE_CANCELLED),
        Outcome::SharedView(view) => dishes_text(SHARED_TITLE, &view.dishes),
        Outcome::NoSharedView => String::new(),
    }
}

/// User-facing message for a failed action. Details stay in the log.
pub fn failure_message(kind: CommandKind, err: &AppError) -> String {
    use crate::app_error::ValidationError;
    use crate::entities::{DishNameTryFromError, DishOriginTryFromError};

    match err {
        AppError::Validation(ValidationError::DishName(DishNameTryFromError::TooLong)) => {
            format!("料理名は{}文字以内で入力してください", entities::MAX_DISH_NAME_CHARS)
        }
        AppError::Validation(ValidationError::DishOrigin(DishOriginTryFromError::TooLong)) => {
            format!("由来は{}文字以内で入力してください", entities::MAX_DISH_ORIGIN_CHARS)
        }
        AppError::Validation(ValidationError::DrawCount(_)) => format!(
            "{}〜{}の数字を入力してください",
            entities::MIN_DRAW_COUNT,
            entities::MAX_DRAW_COUNT
        ),
        AppError::Validation(_) => "料理名と由来を入力してください".to_string(),
        AppError::EmptyPopulation => MSG_EMPTY_POOL.to_string(),
        AppError::NotFound if kind == CommandKind::OpenLink => MSG_NO_SHARED_CONTENT.to_string(),
        AppError::DecodeFailure(_) => MSG_NO_SHARED_CONTENT.to_string(),
        AppError::Unauthenticated => "❌ ログインの準備ができていません。しばらくしてからもう一度お試しください。".to_string(),
        AppError::NotFound | AppError::Collaborator(_) => match kind {
            CommandKind::SubmitDish => "❌ 追加に失敗しました。もう一度お試しください。",
            CommandKind::Draw => "❌ ガチャに失敗しました。",
            CommandKind::ShareDraw => "❌ シェアに失敗しました。",
            CommandKind::ListAll | CommandKind::ListMine | CommandKind::OpenLink => {
                "❌ 取得に失敗しました。"
            }
            CommandKind::DeleteDish => "❌ 削除に失敗しました。",
        }
        .to_string(),
    }
}
