//! The bundled demo skill: a spoken shopping list.
//!
//! Served by `vocalis serve` and used by `vocalis assets` and
//! `vocalis invoke`. It touches every declaration feature: typed and custom
//! slots, built-in intents with and without utterances, an auto-named
//! intent, guarded actions with their own rejection handler, a suspending
//! handler, SSML, cards and reprompts.

use std::sync::Arc;

use serde_json::{Value, json};

use vocalis_core::{Action, Card, Completion, Handler, Reply, Skill, SkillBuilder, Templates};
use vocalis_types::config::SkillConfig;
use vocalis_types::error::ValidationError;
use vocalis_types::request::SkillRequest;
use vocalis_types::{Attributes, Slots};

/// Session attribute holding the list.
pub const ITEMS: &str = "items";

/// Largest quantity one request may add.
pub const MAX_QUANTITY: u32 = 20;

pub const ITEM_VALUES: [&str; 6] = ["milk", "bread", "eggs", "apples", "coffee", "rice"];

pub fn demo_skill(config: SkillConfig) -> Result<Skill, ValidationError> {
    let mut b = SkillBuilder::new(config);

    b.custom_slot("Item", ITEM_VALUES)?;

    b.on_start(Handler::reply(
        Reply::text("Welcome to your shopping list. What should I add?")
            .reprompt("Say for example, add milk")
            .end_session(false),
    ));
    b.on_end(Handler::reply("Goodbye"));
    b.default_action_fail(Handler::reply(
        Reply::text("Sorry, that does not fit right now").end_session(false),
    ));

    let add = b.intent(
        "AddItem",
        [
            "add {item:Item}",
            "put {item:Item} on the list",
            "add {quantity:Number} {item:Item}",
        ],
        Handler::sync(add_item),
    )?;
    let list = b.intent(
        "ListItems",
        ["what is on my list", "read my list"],
        Handler::sync(list_items),
    )?;
    let clear = b.intent(
        "ClearList",
        "clear my list",
        Handler::reply(
            Reply::text("Do you really want to clear your list?")
                .reprompt("Say yes or no")
                .end_session(false),
        ),
    )?;
    // Left unnamed so it shows up under a generated name.
    let count = b.intent(
        "",
        ["how many items", "count my items"],
        Handler::suspending(count_items),
    )?;

    let yes = b.built_in_intent("yes", Handler::sync(clear_items))?;
    let no = b.built_in_intent(
        "no",
        Handler::reply(Reply::text("Okay, I kept it").end_session(false)),
    )?;
    let help = b.built_in_intent_with_utterances(
        "help",
        ["what can I say"],
        Handler::reply(
            Reply::text("You can add items, read your list or clear it").end_session(false),
        ),
    )?;
    let stop =
        b.built_in_intent_with_utterances("stop", Templates::none(), Handler::reply("Goodbye"))?;

    for target in [&add, &list, &clear, &count, &help, &stop] {
        b.action(Action::new("*", target.as_str()));
    }
    b.action(
        Action::new(clear.as_str(), yes.as_str())
            .when(|_, attrs| item_count(attrs) > 0)
            .on_reject(Handler::reply(
                Reply::text("Your list is already empty").end_session(false),
            )),
    );
    b.action(Action::new(clear.as_str(), no.as_str()));

    b.build()
}

fn items(attrs: &Attributes) -> Vec<String> {
    attrs
        .get(ITEMS)
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

fn item_count(attrs: &Attributes) -> usize {
    attrs.get(ITEMS).and_then(Value::as_array).map_or(0, Vec::len)
}

fn add_item(slots: &Slots, attrs: &mut Attributes, _request: &SkillRequest) -> Reply {
    let Some(item) = slots.get("item").and_then(Value::as_str) else {
        return Reply::text("What should I add?")
            .reprompt("Tell me an item to add")
            .end_session(false);
    };
    let quantity = slots
        .get("quantity")
        .and_then(Value::as_str)
        .and_then(|q| q.parse::<u32>().ok())
        .unwrap_or(1);
    if quantity > MAX_QUANTITY {
        return Reply::text(format!("I can add at most {MAX_QUANTITY} at a time"))
            .reprompt(format!("How many {item} should I add?"))
            .end_session(false);
    }

    let mut list = items(attrs);
    list.extend(std::iter::repeat_n(item.to_string(), quantity as usize));
    attrs.insert(ITEMS.to_string(), json!(list));

    Reply::text(format!("Added {item}")).end_session(false)
}

fn list_items(_slots: &Slots, attrs: &mut Attributes, _request: &SkillRequest) -> Reply {
    let list = items(attrs);
    if list.is_empty() {
        return Reply::text("Your list is empty").end_session(false);
    }
    let spoken = list.join(", ");
    Reply::ssml(format!("<speak>On your list: {spoken}</speak>"))
        .card(Card::simple("Shopping list", list.join("\n")))
        .end_session(false)
}

fn clear_items(_slots: &Slots, attrs: &mut Attributes, _request: &SkillRequest) -> Reply {
    let removed = item_count(attrs);
    let mut cleared = attrs.clone();
    cleared.insert(ITEMS.to_string(), json!([]));
    Reply::text(format!("Removed {removed} items"))
        .attributes(cleared)
        .end_session(false)
}

fn count_items(_slots: Slots, attrs: Attributes, _request: Arc<SkillRequest>, done: Completion) {
    tokio::spawn(async move {
        let n = item_count(&attrs);
        done.done(Reply::text(format!("You have {n} items on your list")).end_session(false));
    });
}
