pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    auth_id TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL,
    name TEXT NOT NULL,
    age INTEGER,
    weight REAL,
    height REAL,
    gender TEXT,
    goal TEXT,
    activity_level TEXT NOT NULL,
    target_weight REAL,
    bmi REAL,
    bmr INTEGER,
    tdee INTEGER,
    target_calories INTEGER,
    protein INTEGER,
    carbs INTEGER,
    fats INTEGER,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS foods (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    calories REAL NOT NULL,
    protein REAL NOT NULL,
    carbs REAL NOT NULL,
    fats REAL NOT NULL,
    serving_size TEXT NOT NULL,
    category TEXT NOT NULL,
    health_score INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS meals (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    meal_type TEXT NOT NULL,
    food_items TEXT NOT NULL,
    total_calories REAL NOT NULL,
    total_protein REAL NOT NULL,
    total_carbs REAL NOT NULL,
    total_fats REAL NOT NULL,
    date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS meals_user_date ON meals (user_id, date);

CREATE TABLE IF NOT EXISTS workouts (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    duration INTEGER NOT NULL,
    difficulty TEXT NOT NULL,
    body_part TEXT NOT NULL,
    calories_burned INTEGER NOT NULL,
    exercises TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_workouts (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    workout_id TEXT NOT NULL REFERENCES workouts (id),
    completion_time INTEGER NOT NULL,
    calories_burned INTEGER NOT NULL,
    date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_metrics (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    date TEXT NOT NULL,
    weight REAL NOT NULL,
    bmi REAL NOT NULL,
    water_intake REAL NOT NULL,
    steps INTEGER NOT NULL,
    UNIQUE (user_id, date)
);

CREATE TABLE IF NOT EXISTS chat_sessions (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS chat_messages (
    id TEXT PRIMARY KEY NOT NULL,
    session_id TEXT NOT NULL REFERENCES chat_sessions (id) ON DELETE CASCADE,
    role TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;
