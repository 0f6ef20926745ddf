//! Alembic migration scaffold

/// Requirement line appended to `requirements.txt`
pub const REQUIREMENT_MARKER: &str = "alembic";

/// Block appended when the requirement is missing
pub const REQUIREMENT_BLOCK: &str = "\n# Database migrations\nalembic>=1.12.0\n";

/// Settings module read by the scaffold's `app/db/session.py`
pub const SETTINGS_FILE: &str = "app/core/config.py";

/// Settings field the session options are placed after
pub const SETTINGS_ANCHOR: &str = "DATABASE_URL";

/// Session options the settings class must define
pub const SETTINGS_FIELDS: &[(&str, &str)] = &[
    ("DB_ECHO", "DB_ECHO: bool = False"),
    (
        "DB_CONNECT_ARGS",
        r#"DB_CONNECT_ARGS: dict = {"check_same_thread": False}  # SQLite only"#,
    ),
];

/// Files written by the migration scaffold, relative to the project root
pub const FILES: &[(&str, &str)] = &[
    ("alembic.ini", ALEMBIC_INI),
    ("migrations/README.md", README_MD),
    ("migrations/__init__.py", "# Migration environment\n"),
    ("migrations/env.py", ENV_PY),
    ("migrations/script.py.mako", SCRIPT_PY_MAKO),
    ("migrations/versions/__init__.py", "# Migration versions\n"),
    ("app/db/base.py", DB_BASE_PY),
    ("app/db/session.py", DB_SESSION_PY),
];

const ALEMBIC_INI: &str = "# alembic.ini
[alembic]
script_location = migrations
prepend_sys_path = .
sqlalchemy.url = %(DATABASE_URL)s

[loggers]
keys = root,sqlalchemy,alembic

[handlers]
keys = console

[formatters]
keys = generic

[logger_root]
level = WARN
handlers = console
qualname =

[logger_sqlalchemy]
level = WARN
handlers =
qualname = sqlalchemy.engine

[logger_alembic]
level = INFO
handlers =
qualname = alembic

[handler_console]
class = StreamHandler
args = (sys.stderr,)
level = NOTSET
formatter = generic

[formatter_generic]
format = %(levelname)-5.5s [%(name)s] %(message)s
datefmt = %H:%M:%S
";

const ENV_PY: &str = r#""""Alembic migration environment."""
import os
import sys
from logging.config import fileConfig

from alembic import context
from sqlalchemy import engine_from_config, pool
from sqlmodel import SQLModel

sys.path.append(os.path.dirname(os.path.dirname(__file__)))

# Import every model so autogenerate can see its table.
from app.models import *  # noqa: E402,F401,F403
from app.db.base import Base  # noqa: E402

config = context.config
config.set_main_option("sqlalchemy.url", os.environ.get("DATABASE_URL", "sqlite:///./app.db"))

if config.config_file_name is not None:
    fileConfig(config.config_file_name)

target_metadata = [SQLModel.metadata, Base.metadata]


def run_migrations_offline() -> None:
    context.configure(
        url=config.get_main_option("sqlalchemy.url"),
        target_metadata=target_metadata,
        literal_binds=True,
        dialect_opts={"paramstyle": "named"},
    )
    with context.begin_transaction():
        context.run_migrations()


def run_migrations_online() -> None:
    connectable = engine_from_config(
        config.get_section(config.config_ini_section, {}),
        prefix="sqlalchemy.",
        poolclass=pool.NullPool,
    )
    with connectable.connect() as connection:
        context.configure(connection=connection, target_metadata=target_metadata)
        with context.begin_transaction():
            context.run_migrations()


if context.is_offline_mode():
    run_migrations_offline()
else:
    run_migrations_online()
"#;

const SCRIPT_PY_MAKO: &str = r#""""${message}

Revision ID: ${up_revision}
Revises: ${down_revision | comma,n}
Create Date: ${create_date}

"""
from typing import Sequence, Union

from alembic import op
import sqlalchemy as sa
import sqlmodel
${imports if imports else ""}

revision: str = ${repr(up_revision)}
down_revision: Union[str, None] = ${repr(down_revision)}
branch_labels: Union[str, Sequence[str], None] = ${repr(branch_labels)}
depends_on: Union[str, Sequence[str], None] = ${repr(depends_on)}


def upgrade() -> None:
    ${upgrades if upgrades else "pass"}


def downgrade() -> None:
    ${downgrades if downgrades else "pass"}
"#;

const README_MD: &str = r#"# Database migrations

Migrations are managed with Alembic. `DATABASE_URL` selects the database.

## Creating a migration

```bash
# Detect model changes automatically
alembic revision --autogenerate -m "describe the change"

# Empty migration script
alembic revision -m "describe the change"
```

## Applying migrations

```bash
alembic upgrade head       # latest version
alembic upgrade <revision> # specific version
alembic upgrade +2         # two steps forward
alembic downgrade -1       # one step back
alembic downgrade base     # undo everything
```

## Inspecting state

```bash
alembic current
alembic history
alembic show <revision>
```
"#;

const DB_BASE_PY: &str = r#""""Declarative base for plain SQLAlchemy models."""
from sqlalchemy.orm import declarative_base

Base = declarative_base()
"#;

const DB_SESSION_PY: &str = r#""""Database session management."""
from sqlalchemy import create_engine
from sqlalchemy.orm import sessionmaker
from sqlmodel import Session, SQLModel

from app.core.config import settings
from app.db.base import Base

engine = create_engine(
    settings.DATABASE_URL,
    echo=settings.DB_ECHO,
    connect_args=settings.DB_CONNECT_ARGS,
)

SessionLocal = sessionmaker(class_=Session, autocommit=False, autoflush=False, bind=engine)


def init_db() -> None:
    """Create all tables. Use Alembic migrations outside development."""
    Base.metadata.create_all(bind=engine)
    SQLModel.metadata.create_all(bind=engine)


def get_session():
    """Yield a database session."""
    session = SessionLocal()
    try:
        yield session
    finally:
        session.close()
"#;
