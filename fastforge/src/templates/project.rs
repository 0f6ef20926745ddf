//! Built-in project template files
//!
//! Each kind extends the previous one: `standard` is `basic` plus its own
//! files, `enterprise` is `standard` plus its own files.

/// Files shared by every project kind
pub const BASIC_FILES: &[(&str, &str)] = &[
    ("{{ project_name }}/main.py.tmpl", MAIN_PY),
    ("{{ project_name }}/README.md.tmpl", README_MD),
    ("{{ project_name }}/requirements.txt", REQUIREMENTS_TXT),
    ("{{ project_name }}/.gitignore", GITIGNORE),
    ("{{ project_name }}/app/__init__.py", ""),
    ("{{ project_name }}/app/api/__init__.py", ""),
    ("{{ project_name }}/app/api/api_v1/__init__.py", ""),
    ("{{ project_name }}/app/api/api_v1/api.py", API_ROUTER_PY),
    ("{{ project_name }}/app/api/api_v1/endpoints/__init__.py", ""),
    ("{{ project_name }}/app/core/__init__.py", ""),
    ("{{ project_name }}/app/core/config.py.tmpl", CONFIG_PY),
    ("{{ project_name }}/app/db/__init__.py", ""),
    ("{{ project_name }}/app/db/session.py", SESSION_PY),
    ("{{ project_name }}/app/models/__init__.py", "\"\"\"Models package.\"\"\"\n"),
    ("{{ project_name }}/app/schemas/__init__.py", "\"\"\"Schemas package.\"\"\"\n"),
    ("{{ project_name }}/app/services/__init__.py", "\"\"\"Services package.\"\"\"\n"),
];

/// Files added by the `standard` kind
pub const STANDARD_FILES: &[(&str, &str)] = &[
    ("{{ project_name }}/.env.example.tmpl", ENV_EXAMPLE),
    ("{{ project_name }}/tests/__init__.py", ""),
    ("{{ project_name }}/tests/test_health.py", TEST_HEALTH_PY),
];

/// Files added by the `enterprise` kind
pub const ENTERPRISE_FILES: &[(&str, &str)] = &[
    ("{{ project_name }}/Dockerfile.tmpl", DOCKERFILE),
    ("{{ project_name }}/docker-compose.yml.tmpl", DOCKER_COMPOSE_YML),
    ("{{ project_name }}/pyproject.toml.tmpl", PYPROJECT_TOML),
    ("{{ project_name }}/app/core/logging.py", LOGGING_PY),
    ("{{ project_name }}/app/core/security.py", SECURITY_PY),
    ("{{ project_name }}/app/middleware/__init__.py", MIDDLEWARE_PY),
];

const MAIN_PY: &str = r#""""{{ project_title }} application entry point."""
from fastapi import FastAPI

from app.api.api_v1.api import api_router
from app.core.config import settings

app = FastAPI(
    title=settings.PROJECT_NAME,
    openapi_url=f"{settings.API_V1_STR}/openapi.json",
)

app.include_router(api_router, prefix=settings.API_V1_STR)


@app.get("/health")
def health() -> dict[str, str]:
    return {"status": "ok"}
"#;

const README_MD: &str = r"# {{ project_display_name }}

FastAPI service generated by fastforge.

## Getting started

```bash
python -m venv .venv
source .venv/bin/activate
pip install -r requirements.txt
uvicorn main:app --reload
```

The API is served under `/api/v1`; interactive docs live at `/docs`.

## Adding resources

```bash
fastforge generate model item
fastforge generate service item
fastforge generate api item
```

Each command writes its module and registers it in the matching package or
router file. Running a command twice does not duplicate registrations.
";

const REQUIREMENTS_TXT: &str = "fastapi>=0.104.0
uvicorn[standard]>=0.24.0
pydantic>=2.4.0
pydantic-settings>=2.0.0
sqlmodel>=0.0.11
";

const GITIGNORE: &str = "__pycache__/
*.py[cod]
.venv/
.env
*.db
.pytest_cache/
.mypy_cache/
dist/
build/
";

const API_ROUTER_PY: &str = "from fastapi import APIRouter

api_router = APIRouter()
";

const CONFIG_PY: &str = r#""""Application settings."""
from pydantic_settings import BaseSettings, SettingsConfigDict


class Settings(BaseSettings):
    model_config = SettingsConfigDict(env_file=".env", case_sensitive=True)

    PROJECT_NAME: str = "{{ project_display_name_literal }}"
    API_V1_STR: str = "/api/v1"
    DATABASE_URL: str = "sqlite:///./{{ project_name }}.db"
    DB_ECHO: bool = False
    DB_CONNECT_ARGS: dict = {"check_same_thread": False}


settings = Settings()
"#;

const SESSION_PY: &str = r#""""Database session management."""
from sqlmodel import Session, SQLModel, create_engine

from app.core.config import settings

engine = create_engine(
    settings.DATABASE_URL,
    echo=settings.DB_ECHO,
    connect_args=settings.DB_CONNECT_ARGS,
)


def init_db() -> None:
    """Create all tables (development only)."""
    SQLModel.metadata.create_all(engine)


def get_session():
    """Yield a database session."""
    with Session(engine) as session:
        yield session
"#;

const ENV_EXAMPLE: &str = "PROJECT_NAME=\"{{ project_display_name_literal }}\"
DATABASE_URL=sqlite:///./{{ project_name }}.db
DB_ECHO=false
";

const TEST_HEALTH_PY: &str = r#"from fastapi.testclient import TestClient

from main import app

client = TestClient(app)


def test_health() -> None:
    response = client.get("/health")
    assert response.status_code == 200
    assert response.json() == {"status": "ok"}
"#;

const DOCKERFILE: &str = r#"FROM python:3.12-slim

WORKDIR /srv/{{ project_name }}

ENV PYTHONDONTWRITEBYTECODE=1 \
    PYTHONUNBUFFERED=1

COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

COPY . .

EXPOSE 8000
CMD ["uvicorn", "main:app", "--host", "0.0.0.0", "--port", "8000"]
"#;

const DOCKER_COMPOSE_YML: &str = "services:
  {{ project_kebab_name }}:
    build: .
    ports:
      - \"8000:8000\"
    environment:
      DATABASE_URL: postgresql://{{ project_name }}:{{ project_name }}@db:5432/{{ project_name }}
    depends_on:
      - db

  db:
    image: postgres:16
    environment:
      POSTGRES_USER: {{ project_name }}
      POSTGRES_PASSWORD: {{ project_name }}
      POSTGRES_DB: {{ project_name }}
    volumes:
      - db-data:/var/lib/postgresql/data

volumes:
  db-data:
";

const PYPROJECT_TOML: &str = r#"[project]
name = "{{ project_kebab_name }}"
version = "0.1.0"
description = "{{ project_display_name_literal }} API"
requires-python = ">=3.10"

[tool.pytest.ini_options]
testpaths = ["tests"]

[tool.ruff]
line-length = 100
"#;

const LOGGING_PY: &str = r#""""Logging setup."""
import logging
import sys


def configure_logging(level: int = logging.INFO) -> None:
    logging.basicConfig(
        level=level,
        stream=sys.stdout,
        format="%(asctime)s %(levelname)s [%(name)s] %(message)s",
    )
"#;

const SECURITY_PY: &str = r#""""Password hashing helpers."""
import hashlib
import hmac
import os

_ITERATIONS = 390_000


def hash_password(password: str) -> str:
    salt = os.urandom(16)
    digest = hashlib.pbkdf2_hmac("sha256", password.encode(), salt, _ITERATIONS)
    return f"{salt.hex()}${digest.hex()}"


def verify_password(password: str, stored: str) -> bool:
    salt_hex, digest_hex = stored.split("$", 1)
    digest = hashlib.pbkdf2_hmac(
        "sha256", password.encode(), bytes.fromhex(salt_hex), _ITERATIONS
    )
    return hmac.compare_digest(digest.hex(), digest_hex)
"#;

const MIDDLEWARE_PY: &str = r#""""HTTP middleware."""
import time

from starlette.middleware.base import BaseHTTPMiddleware


class TimingMiddleware(BaseHTTPMiddleware):
    async def dispatch(self, request, call_next):
        started = time.perf_counter()
        response = await call_next(request)
        response.headers["X-Process-Time"] = f"{time.perf_counter() - started:.4f}"
        return response
"#;
