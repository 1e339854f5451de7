//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::{jfloat, jstring};
use jni::JNIEnv;

use crate::{render_card_to_svg, render_measure_to_svg, CardConfig, Deck, Result};

fn to_jstring(env: &mut JNIEnv, result: Result<String>) -> jstring {
    match result {
        Ok(svg) => match env.new_string(&svg) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(_) => std::ptr::null_mut(),
    }
}

/// Render a card from the standard deck by card number.
///
/// Called from Kotlin as:
///   external fun renderCard(cardNumber: String, width: Float, height: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_composecards_app_CardScore_renderCard(
    mut env: JNIEnv,
    _class: JClass,
    card_number: JString,
    width: jfloat,
    height: jfloat,
) -> jstring {
    let number: String = match env.get_string(&card_number) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let config = CardConfig::with_size(width as f64, height as f64);
    let result = render_card_to_svg(&number, &Deck::standard(), &config);
    to_jstring(&mut env, result)
}

/// Render a measure code as a card.
///
/// Called from Kotlin as:
///   external fun renderMeasure(code: String, width: Float, height: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_composecards_app_CardScore_renderMeasure(
    mut env: JNIEnv,
    _class: JClass,
    code: JString,
    width: jfloat,
    height: jfloat,
) -> jstring {
    let code: String = match env.get_string(&code) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let config = CardConfig::with_size(width as f64, height as f64);
    let result = render_measure_to_svg(&code, &config);
    to_jstring(&mut env, result)
}
