// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Static message catalogs.
//!
//! Lookup falls back to English, then to the key itself. Placeholders are
//! written `{name}` and filled by [`tf`].

/// Language codes with a catalog, default first.
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "ru"];

const DEFAULT_LANGUAGE: &str = "en";

/// Canonical code for `code` if we have a catalog for it.
///
/// Accepts region-qualified client codes ("ru-RU").
pub fn supported(code: &str) -> Option<&'static str> {
    let base = code.split(['-', '_']).next().unwrap_or(code);
    SUPPORTED_LANGUAGES
        .into_iter()
        .find(|lang| lang.eq_ignore_ascii_case(base))
}

/// Native name of a language, for the settings picker.
pub fn language_name(code: &str) -> &'static str {
    match code {
        "ru" => "Русский",
        _ => "English",
    }
}

fn catalog(lang: &str) -> &'static [(&'static str, &'static str)] {
    match lang {
        "ru" => RU,
        _ => EN,
    }
}

fn lookup(lang: &str, key: &str) -> Option<&'static str> {
    catalog(lang)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Message for `key` in `lang`.
pub fn t(lang: &str, key: &str) -> String {
    lookup(lang, key)
        .or_else(|| lookup(DEFAULT_LANGUAGE, key))
        .map(str::to_string)
        .unwrap_or_else(|| {
            tracing::warn!(lang, key, "Missing translation");
            key.to_string()
        })
}

/// Message for `key` with `{name}` placeholders replaced.
pub fn tf(lang: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut text = t(lang, key);
    for (name, value) in args {
        text = text.replace(&format!("{{{}}}", name), value);
    }
    text
}

static EN: &[(&str, &str)] = &[
    // Start, menu, help
    ("start.welcome", "Hi {name}! I report weather and air quality and can warn you when conditions change."),
    ("start.ready", "Pick what you need below."),
    ("start.need_location", "First, send me your location: share a pin, type a city name, or send coordinates like \"55.75, 37.62\"."),
    ("menu.title", "What would you like to see, {name}?"),
    ("help.text", "Commands:\n/weather - current conditions\n/forecast - next 24 hours\n/air - air quality\n/location <place> - set your location\n/timezone <Area/City> - set your timezone\n/alerts - threshold alerts\n/subscriptions - scheduled notifications\n/settings - language and units\n/export - download your data\n\nYou can also just send a place name, coordinates, a location pin or a timezone name."),
    ("help.moderator", "Moderator:\n/users - list users\n/stats - usage statistics"),
    ("help.admin", "Admin:\n/promote <id> [role] - raise a user one step\n/demote <id> [role] - lower a user one step"),
    ("command.unknown", "Unknown command. Send /help for the list."),
    // Buttons
    ("button.menu", "🏠 Menu"),
    ("button.back", "⬅️ Back"),
    ("button.confirm", "✅ Confirm"),
    ("button.ignore", "✖️ Ignore"),
    ("button.weather_now", "🌤 Now"),
    ("button.forecast", "📅 Forecast"),
    ("button.air", "🌫 Air"),
    ("button.refresh", "🔄 Refresh"),
    ("button.alerts", "🔔 Alerts"),
    ("button.subscriptions", "📬 Subscriptions"),
    ("button.settings", "⚙️ Settings"),
    ("button.export", "💾 Export"),
    ("button.help", "❓ Help"),
    ("button.admin", "🛡 Admin"),
    ("button.add", "➕ Add"),
    ("button.delete", "🗑 Delete"),
    ("button.pause", "⏸ Pause"),
    ("button.resume", "▶️ Resume"),
    ("button.threshold", "🎚 Threshold"),
    ("button.operator", "⚖️ Condition"),
    ("button.time", "🕗 Time"),
    ("button.frequency", "🔁 Frequency"),
    ("button.users", "👥 Users"),
    ("button.stats", "📊 Stats"),
    ("button.export_users", "💾 Export users"),
    // Errors
    ("error.malformed", "Sorry, I couldn't understand that request."),
    ("error.permission_denied", "Insufficient permissions."),
    ("error.not_found", "Not found. It may have been deleted."),
    ("error.location_required", "Set your location first: send a place name or share a location pin."),
    ("error.limit_reached", "You have reached the limit of {limit}."),
    ("error.failed", "Something went wrong. Please try again."),
    // Location and timezone
    ("location.confirm_prompt", "Set your location to {place}?"),
    ("location.saved", "Location saved: {place}"),
    ("location.ignored", "OK, location unchanged."),
    ("location.hint", "Send a place name, coordinates, or share a location pin."),
    ("location.hint_current", "Your location is {place}. Send a place name, coordinates, or a pin to change it."),
    ("timezone.confirm_prompt", "Set your timezone to {tz}?"),
    ("timezone.saved", "Timezone saved: {tz}"),
    ("timezone.ignored", "OK, timezone unchanged."),
    ("timezone.hint", "Your timezone is {tz}. Send /timezone Area/City to change it."),
    ("timezone.invalid", "\"{tz}\" is not a known timezone. Use a name like Europe/Berlin."),
    // Roles
    ("role.confirm_prompt", "Change role of {user} from {old} to {new}?"),
    ("role.warning_admin", "⚠️ This removes Admin rights."),
    ("role.changed", "Role of {user} changed from {old} to {new}."),
    ("role.already", "{user} already has role {role}."),
    ("role.ignored", "OK, role unchanged."),
    ("role.usage", "Usage: /promote <user id> [role] or /demote <user id> [role]"),
    ("role.notify_target", "Your role is now {role}."),
    ("role.reject.skip_promote", "Must promote to Moderator first."),
    ("role.reject.skip_demote", "Must demote to Moderator first."),
    ("role.reject.highest", "This user already has the highest role."),
    ("role.reject.lowest", "This user already has the lowest role."),
    ("role.reject.mismatch", "The requested role does not match the change."),
    ("role.reject.unchanged", "The role is unchanged."),
    // Weather
    ("weather.current_title", "📍 {place}"),
    ("weather.forecast_title", "📅 Forecast for {place}"),
    ("weather.weekly_title", "📅 The week ahead in {place}"),
    ("weather.temperature", "Temperature"),
    ("weather.feels_like", "feels like"),
    ("weather.humidity", "Humidity"),
    ("weather.pressure", "Pressure"),
    ("weather.wind", "Wind"),
    ("weather.rain", "Rain (1h)"),
    ("weather.observed_at", "Observed at {time}"),
    ("weather.no_data", "No forecast data."),
    ("air.title", "🌫 Air quality in {place}"),
    ("air.index", "Index"),
    ("air.level.1", "good"),
    ("air.level.2", "fair"),
    ("air.level.3", "moderate"),
    ("air.level.4", "poor"),
    ("air.level.5", "very poor"),
    // Alerts
    ("alert.list_title", "Your alerts ({count} of {limit}):"),
    ("alert.list_empty", "You have no alerts yet."),
    ("alert.pick_type", "What should the alert watch?"),
    ("alert.pick_threshold", "{alert}\nPick a new threshold ({unit}):"),
    ("alert.pick_operator", "Fire when the value is:"),
    ("alert.created", "Alert created."),
    ("alert.updated", "Alert updated."),
    ("alert.deleted", "Alert deleted."),
    ("alert.last_triggered", "Last triggered: {time}"),
    ("alert_type.temperature", "Temperature"),
    ("alert_type.humidity", "Humidity"),
    ("alert_type.pressure", "Pressure"),
    ("alert_type.wind_speed", "Wind speed"),
    ("alert_type.uv_index", "UV index"),
    ("alert_type.air_quality", "Air quality"),
    ("alert_type.precipitation", "Precipitation"),
    // Subscriptions
    ("sub.list_title", "Your subscriptions (times in {tz}):"),
    ("sub.list_empty", "You have no subscriptions yet."),
    ("sub.pick_type", "Which notification would you like?"),
    ("sub.pick_time", "Current time: {time} ({tz}). Pick a new one:"),
    ("sub.pick_frequency", "How often?"),
    ("sub.created", "Subscription created."),
    ("sub.created_no_location", "Subscription created. Set your location so I know where to look."),
    ("sub.exists", "You already have this subscription."),
    ("sub.updated", "Subscription updated."),
    ("sub.deleted", "Subscription deleted."),
    ("sub.frequency", "Frequency"),
    ("sub.time", "Time"),
    ("sub.delivery", "Delivery"),
    ("sub.delivery.daily", "every day at the set time"),
    ("sub.delivery.weekly", "Sundays at the set time"),
    ("sub.delivery.alerts", "at the set time, only if an alert fires"),
    ("sub.delivery.extreme", "at the set time, only in extreme weather"),
    ("sub_type.daily", "Daily forecast"),
    ("sub_type.weekly", "Weekly forecast"),
    ("sub_type.alerts", "Alert digest"),
    ("sub_type.extreme", "Extreme weather"),
    ("freq.hourly", "hourly"),
    ("freq.every3h", "every 3 hours"),
    ("freq.every6h", "every 6 hours"),
    ("freq.daily", "daily"),
    ("freq.weekly", "weekly"),
    ("status.label", "Status"),
    ("status.active", "active"),
    ("status.paused", "paused"),
    // Notifications
    ("notify.daily_title", "☀️ Good morning! Today's weather:"),
    ("notify.weekly_title", "🗓 Your weekly outlook:"),
    ("notify.alerts_title", "🔔 Alerts for {place}:"),
    ("notify.extreme_title", "🚨 Extreme weather in {place}:"),
    ("notify.now", "now {value}"),
    ("extreme.heat", "Extreme heat"),
    ("extreme.frost", "Extreme cold"),
    ("extreme.wind", "Storm-force wind"),
    ("extreme.air", "Hazardous air quality"),
    // Settings
    ("settings.title", "⚙️ Settings"),
    ("settings.language", "Language"),
    ("settings.units", "Units"),
    ("settings.location", "Location"),
    ("settings.timezone", "Timezone"),
    ("settings.not_set", "not set"),
    ("settings.hint", "Send a place name to change location, or /timezone Area/City."),
    ("units.metric", "Metric (°C, m/s)"),
    ("units.imperial", "Imperial (°F, mph)"),
    // Admin and export
    ("admin.title", "🛡 Administration"),
    ("admin.users_title", "Users ({count}):"),
    ("admin.users_more", "…and {count} more"),
    ("admin.role_hint", "Change roles with /promote <id> or /demote <id>."),
    ("admin.stats", "Users: {users} (admins {admins}, moderators {moderators})\nWith location: {located}\nActive subscriptions: {subs}"),
    ("export.ready", "Here is your data."),
    ("export.users_ready", "Exported {count} users."),
];

static RU: &[(&str, &str)] = &[
    // Start, menu, help
    ("start.welcome", "Привет, {name}! Я показываю погоду и качество воздуха и могу предупредить об изменениях."),
    ("start.ready", "Выберите нужное ниже."),
    ("start.need_location", "Сначала пришлите своё местоположение: точку на карте, название города или координаты вида \"55.75, 37.62\"."),
    ("menu.title", "Что показать, {name}?"),
    ("help.text", "Команды:\n/weather - погода сейчас\n/forecast - прогноз на сутки\n/air - качество воздуха\n/location <место> - задать местоположение\n/timezone <Регион/Город> - задать часовой пояс\n/alerts - оповещения\n/subscriptions - рассылки\n/settings - язык и единицы\n/export - выгрузить данные\n\nМожно просто прислать название места, координаты, точку на карте или часовой пояс."),
    ("help.moderator", "Модератор:\n/users - пользователи\n/stats - статистика"),
    ("help.admin", "Администратор:\n/promote <id> [роль] - повысить на одну ступень\n/demote <id> [роль] - понизить на одну ступень"),
    ("command.unknown", "Неизвестная команда. Список: /help"),
    // Buttons
    ("button.menu", "🏠 Меню"),
    ("button.back", "⬅️ Назад"),
    ("button.confirm", "✅ Подтвердить"),
    ("button.ignore", "✖️ Отмена"),
    ("button.weather_now", "🌤 Сейчас"),
    ("button.forecast", "📅 Прогноз"),
    ("button.air", "🌫 Воздух"),
    ("button.refresh", "🔄 Обновить"),
    ("button.alerts", "🔔 Оповещения"),
    ("button.subscriptions", "📬 Рассылки"),
    ("button.settings", "⚙️ Настройки"),
    ("button.export", "💾 Экспорт"),
    ("button.help", "❓ Помощь"),
    ("button.admin", "🛡 Админ"),
    ("button.add", "➕ Добавить"),
    ("button.delete", "🗑 Удалить"),
    ("button.pause", "⏸ Пауза"),
    ("button.resume", "▶️ Возобновить"),
    ("button.threshold", "🎚 Порог"),
    ("button.operator", "⚖️ Условие"),
    ("button.time", "🕗 Время"),
    ("button.frequency", "🔁 Частота"),
    ("button.users", "👥 Пользователи"),
    ("button.stats", "📊 Статистика"),
    ("button.export_users", "💾 Экспорт пользователей"),
    // Errors
    ("error.malformed", "Не удалось разобрать запрос."),
    ("error.permission_denied", "Недостаточно прав."),
    ("error.not_found", "Не найдено. Возможно, запись удалена."),
    ("error.location_required", "Сначала задайте местоположение: пришлите название места или точку на карте."),
    ("error.limit_reached", "Достигнут лимит: {limit}."),
    ("error.failed", "Что-то пошло не так. Попробуйте ещё раз."),
    // Location and timezone
    ("location.confirm_prompt", "Установить местоположение: {place}?"),
    ("location.saved", "Местоположение сохранено: {place}"),
    ("location.ignored", "Хорошо, местоположение не изменено."),
    ("location.hint", "Пришлите название места, координаты или точку на карте."),
    ("location.hint_current", "Ваше местоположение: {place}. Чтобы изменить, пришлите название, координаты или точку."),
    ("timezone.confirm_prompt", "Установить часовой пояс {tz}?"),
    ("timezone.saved", "Часовой пояс сохранён: {tz}"),
    ("timezone.ignored", "Хорошо, часовой пояс не изменён."),
    ("timezone.hint", "Ваш часовой пояс: {tz}. Изменить: /timezone Регион/Город."),
    ("timezone.invalid", "\"{tz}\" - неизвестный часовой пояс. Пример: Europe/Moscow."),
    // Roles
    ("role.confirm_prompt", "Изменить роль {user} с {old} на {new}?"),
    ("role.warning_admin", "⚠️ Пользователь потеряет права администратора."),
    ("role.changed", "Роль {user} изменена с {old} на {new}."),
    ("role.already", "У {user} уже роль {role}."),
    ("role.ignored", "Хорошо, роль не изменена."),
    ("role.usage", "Использование: /promote <id> [роль] или /demote <id> [роль]"),
    ("role.notify_target", "Ваша роль теперь: {role}."),
    ("role.reject.skip_promote", "Сначала нужно повысить до Moderator."),
    ("role.reject.skip_demote", "Сначала нужно понизить до Moderator."),
    ("role.reject.highest", "У пользователя уже высшая роль."),
    ("role.reject.lowest", "У пользователя уже низшая роль."),
    ("role.reject.mismatch", "Запрошенная роль не соответствует изменению."),
    ("role.reject.unchanged", "Роль не изменилась."),
    // Weather
    ("weather.current_title", "📍 {place}"),
    ("weather.forecast_title", "📅 Прогноз: {place}"),
    ("weather.weekly_title", "📅 Неделя вперёд: {place}"),
    ("weather.temperature", "Температура"),
    ("weather.feels_like", "ощущается как"),
    ("weather.humidity", "Влажность"),
    ("weather.pressure", "Давление"),
    ("weather.wind", "Ветер"),
    ("weather.rain", "Дождь (1ч)"),
    ("weather.observed_at", "Данные на {time}"),
    ("weather.no_data", "Нет данных прогноза."),
    ("air.title", "🌫 Качество воздуха: {place}"),
    ("air.index", "Индекс"),
    ("air.level.1", "хорошее"),
    ("air.level.2", "удовлетворительное"),
    ("air.level.3", "умеренное"),
    ("air.level.4", "плохое"),
    ("air.level.5", "очень плохое"),
    // Alerts
    ("alert.list_title", "Ваши оповещения ({count} из {limit}):"),
    ("alert.list_empty", "Оповещений пока нет."),
    ("alert.pick_type", "Что отслеживать?"),
    ("alert.pick_threshold", "{alert}\nВыберите новый порог ({unit}):"),
    ("alert.pick_operator", "Срабатывать, когда значение:"),
    ("alert.created", "Оповещение создано."),
    ("alert.updated", "Оповещение обновлено."),
    ("alert.deleted", "Оповещение удалено."),
    ("alert.last_triggered", "Последнее срабатывание: {time}"),
    ("alert_type.temperature", "Температура"),
    ("alert_type.humidity", "Влажность"),
    ("alert_type.pressure", "Давление"),
    ("alert_type.wind_speed", "Скорость ветра"),
    ("alert_type.uv_index", "УФ-индекс"),
    ("alert_type.air_quality", "Качество воздуха"),
    ("alert_type.precipitation", "Осадки"),
    // Subscriptions
    ("sub.list_title", "Ваши рассылки (время {tz}):"),
    ("sub.list_empty", "Рассылок пока нет."),
    ("sub.pick_type", "Какую рассылку добавить?"),
    ("sub.pick_time", "Сейчас: {time} ({tz}). Выберите новое время:"),
    ("sub.pick_frequency", "Как часто?"),
    ("sub.created", "Рассылка создана."),
    ("sub.created_no_location", "Рассылка создана. Задайте местоположение, чтобы я знал, где смотреть погоду."),
    ("sub.exists", "Такая рассылка уже есть."),
    ("sub.updated", "Рассылка обновлена."),
    ("sub.deleted", "Рассылка удалена."),
    ("sub.frequency", "Частота"),
    ("sub.time", "Время"),
    ("sub.delivery", "Доставка"),
    ("sub.delivery.daily", "каждый день в заданное время"),
    ("sub.delivery.weekly", "по воскресеньям в заданное время"),
    ("sub.delivery.alerts", "в заданное время, если сработало оповещение"),
    ("sub.delivery.extreme", "в заданное время, только при экстремальной погоде"),
    ("sub_type.daily", "Ежедневный прогноз"),
    ("sub_type.weekly", "Недельный прогноз"),
    ("sub_type.alerts", "Сводка оповещений"),
    ("sub_type.extreme", "Экстремальная погода"),
    ("freq.hourly", "каждый час"),
    ("freq.every3h", "каждые 3 часа"),
    ("freq.every6h", "каждые 6 часов"),
    ("freq.daily", "ежедневно"),
    ("freq.weekly", "еженедельно"),
    ("status.label", "Статус"),
    ("status.active", "активно"),
    ("status.paused", "на паузе"),
    // Notifications
    ("notify.daily_title", "☀️ Доброе утро! Погода на сегодня:"),
    ("notify.weekly_title", "🗓 Прогноз на неделю:"),
    ("notify.alerts_title", "🔔 Оповещения: {place}"),
    ("notify.extreme_title", "🚨 Экстремальная погода: {place}"),
    ("notify.now", "сейчас {value}"),
    ("extreme.heat", "Сильная жара"),
    ("extreme.frost", "Сильный мороз"),
    ("extreme.wind", "Штормовой ветер"),
    ("extreme.air", "Опасное загрязнение воздуха"),
    // Settings
    ("settings.title", "⚙️ Настройки"),
    ("settings.language", "Язык"),
    ("settings.units", "Единицы"),
    ("settings.location", "Местоположение"),
    ("settings.timezone", "Часовой пояс"),
    ("settings.not_set", "не задано"),
    ("settings.hint", "Чтобы сменить место, пришлите его название. Часовой пояс: /timezone Регион/Город."),
    ("units.metric", "Метрические (°C, м/с)"),
    ("units.imperial", "Имперские (°F, mph)"),
    // Admin and export
    ("admin.title", "🛡 Администрирование"),
    ("admin.users_title", "Пользователи ({count}):"),
    ("admin.users_more", "…и ещё {count}"),
    ("admin.role_hint", "Роли меняются командами /promote <id> и /demote <id>."),
    ("admin.stats", "Пользователей: {users} (админов {admins}, модераторов {moderators})\nС местоположением: {located}\nАктивных рассылок: {subs}"),
    ("export.ready", "Ваши данные."),
    ("export.users_ready", "Выгружено пользователей: {count}."),
];
